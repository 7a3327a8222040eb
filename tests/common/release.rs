//! Release fixture builder

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const EDGE_HEADER: &str = "node1\tnode2\tedge\tedge_descrip\tlayer_descrip\n";

pub const NODE_HEADER: &str = "node_id,node_type,transcript,gene_symbol,gene_full_name,\
gene_model_type,tair_computational_desc,tair_curator_summary,tair_short_desc,go_descr,go_terms,\
mapman_bin,mapman_name,mapman_desc,pheno_aragwas_id,pheno_desc1,pheno_desc2,pheno_desc3,\
pheno_ref,user_notes\n";

/// A release directory under construction
pub struct Release {
    dir: TempDir,
    manifest: Vec<String>,
}

impl Release {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            manifest: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a data file and list it in the manifest
    pub fn file(mut self, path: &str, data_type: &str, prefix: Option<&str>, content: &str) -> Self {
        self.write(path, content);
        let mut entry = format!("- path: {}\n  data_type: {}\n", path, data_type);
        if let Some(prefix) = prefix {
            entry.push_str(&format!("  prefix: {}\n", prefix));
        }
        self.manifest.push(entry);
        self
    }

    /// Write a file without listing it
    pub fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(full, content).expect("Failed to write fixture file");
    }

    /// Write manifest.yaml from the listed files
    pub fn finish(self) -> Self {
        let yaml = if self.manifest.is_empty() {
            "[]\n".to_string()
        } else {
            self.manifest.concat()
        };
        self.write("manifest.yaml", &yaml);
        self
    }

    /// Replace manifest.yaml verbatim
    pub fn manifest_text(self, yaml: &str) -> Self {
        self.write("manifest.yaml", yaml);
        self
    }
}

/// Build a 20-column node row
pub fn node_row(key: &str, node_type: &str, gene_symbol: &str, go_terms: &str) -> String {
    let mut fields = vec![String::new(); 20];
    fields[0] = key.to_string();
    fields[1] = node_type.to_string();
    fields[3] = gene_symbol.to_string();
    fields[10] = if go_terms.contains(',') {
        format!("\"{}\"", go_terms)
    } else {
        go_terms.to_string()
    };
    format!("{}\n", fields.join(","))
}

/// A small but complete release: two edge files, one node file, two
/// cluster files. AT1G57820 has edges but no metadata; AT5G99999 is in a
/// cluster but has no metadata.
pub fn sample_release() -> Release {
    let edges_a = format!(
        "{EDGE_HEADER}\
AT1G01370\tAT1G57820\t4.4\tAraNetv2_log-likelihood-score\tAraNetv2-LC_lit-curated-ppi\n\
AT1G01010\tAT1G01370\t2.8\tAraNetv2_log-likelihood-score\tAraNetv2-CX_pairwise-gene-coexpression\n"
    );
    let edges_b = format!(
        "# AraGWAS associations\n{EDGE_HEADER}\
As2\tAT1G01010\t41.300822742442726\tAraGWAS-Association_score\tAraGWAS-Phenotype_Associations\n"
    );
    let nodes = format!(
        "{NODE_HEADER}{}{}{}{}",
        node_row("AT1G01010", "gene", "NTL10", "GO:0005634, GO:0003700"),
        node_row("AT1G01370", "gene", "CENH3", "GO:0000786"),
        node_row("AT1G01020", "gene", "ARV1", ""),
        node_row("As2", "pheno", "", ""),
    );

    Release::new()
        .file("edges/ppi.tsv", "edge", None, &edges_a)
        .file("edges/pheno.tsv", "edge", None, &edges_b)
        .file("nodes.csv", "node", None, &nodes)
        .file(
            "clusters/I2.tsv",
            "cluster",
            Some("markov_i2"),
            "Cluster1\tAT1G01010\tAT1G01370\nCluster2\tAT1G01020\n",
        )
        .file(
            "clusters/I4.tsv",
            "cluster",
            Some("markov_i4"),
            "Cluster1\tAT1G01010\tAT1G01370\tAT5G99999\n",
        )
        .finish()
}
