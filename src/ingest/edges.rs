//! Edge files: scored node pairs tagged with a source layer
//!
//! ```text
//! node1      node2      edge              edge_descrip                   layer_descrip
//! AT1G01370  AT1G57820  4.40001558779779  AraNetv2_log-likelihood-score  AraNetv2-LC_lit-curated-ppi
//! ```

use super::reader::{Row, TabularFormat, TabularReader};
use super::traits::Ingester;
use super::{IngestError, IngestResult};
use crate::graph::{Dataset, Edge, EdgeType, Node, NodeKey};
use crate::manifest::{DataType, FileDescriptor};
use std::collections::HashSet;
use tracing::info;

/// Column positions in an edge file
pub mod columns {
    pub const NODE1: usize = 0;
    pub const NODE2: usize = 1;
    pub const SCORE: usize = 2;
    pub const EDGE_DESCRIP: usize = 3;
    pub const LAYER_DESCRIP: usize = 4;
    pub const COUNT: usize = 5;
}

pub const EDGE_FORMAT: TabularFormat = TabularFormat::fixed(b'\t', columns::COUNT);

/// Node keys in first-seen order, each kept once
#[derive(Debug, Default)]
struct KeyIndex {
    seen: HashSet<NodeKey>,
    order: Vec<NodeKey>,
}

impl KeyIndex {
    fn insert(&mut self, key: &NodeKey) {
        if self.seen.insert(key.clone()) {
            self.order.push(key.clone());
        }
    }

    fn into_nodes(self) -> Vec<Node> {
        self.order.into_iter().map(Node::new).collect()
    }
}

/// Builds edges and the set of node keys they reference
#[derive(Debug, Default)]
pub struct EdgeIngester;

impl EdgeIngester {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(file: &FileDescriptor, row: &Row) -> IngestResult<Edge> {
        let label = row.get(columns::LAYER_DESCRIP);
        let edge_type = EdgeType::from_layer_label(label).ok_or_else(|| IngestError::InvalidEdgeType {
            file: file.path().to_string(),
            line: row.line,
            label: label.to_string(),
        })?;

        let score_text = row.get(columns::SCORE);
        let score = score_text
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(|| IngestError::InvalidScore {
                file: file.path().to_string(),
                line: row.line,
                value: score_text.to_string(),
            })?;

        Ok(Edge::new(
            row.get(columns::NODE1),
            row.get(columns::NODE2),
            edge_type,
            score,
            score_text,
        ))
    }
}

impl Ingester for EdgeIngester {
    fn id(&self) -> &str {
        "edges"
    }

    fn data_type(&self) -> DataType {
        DataType::Edge
    }

    fn ingest(&self, files: &[FileDescriptor]) -> IngestResult<Dataset> {
        let mut index = KeyIndex::default();
        let mut edges = Vec::new();

        for file in files {
            let before = edges.len();
            for row in TabularReader::open(file, EDGE_FORMAT)? {
                let edge = Self::parse_row(file, &row?)?;
                index.insert(&edge.from);
                index.insert(&edge.to);
                edges.push(edge);
            }
            info!(file = file.path(), edges = edges.len() - before, "read edge file");
        }

        Ok(Dataset::with_edges(index.into_nodes(), edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::reader::test_support::descriptor;
    use serde_json::json;
    use tempfile::TempDir;

    const HEADER: &str = "node1\tnode2\tedge\tedge_descrip\tlayer_descrip\n";

    fn edge_file(dir: &TempDir, name: &str, rows: &str) -> FileDescriptor {
        descriptor(dir, name, DataType::Edge, None, &format!("{HEADER}{rows}"))
    }

    #[test]
    fn single_row_scenario() {
        let dir = TempDir::new().unwrap();
        let file = edge_file(
            &dir,
            "edges.tsv",
            "AT1G01370\tAT1G57820\t4.4\tAraNetv2_log-likelihood-score\tAraNetv2-LC_lit-curated-ppi\n",
        );
        let dataset = EdgeIngester::new().ingest(&[file]).unwrap();
        assert_eq!(
            serde_json::to_value(&dataset).unwrap(),
            json!({
                "nodes": [{"_key": "AT1G01370"}, {"_key": "AT1G57820"}],
                "edges": [{
                    "_key": "AT1G01370__AT1G57820__ppi_liter__4.4",
                    "_from": "AT1G01370",
                    "_to": "AT1G57820",
                    "score": 4.4,
                    "edge_type": "ppi_liter",
                }],
            })
        );
    }

    #[test]
    fn nodes_are_shared_across_files() {
        let dir = TempDir::new().unwrap();
        let a = edge_file(
            &dir,
            "a.tsv",
            "A\tB\t1.0\tx\tAraNetv2-CX_pairwise-gene-coexpression\nB\tC\t2\tx\tAraNetv2-DC_domain-co-occurrence\n",
        );
        let b = edge_file(&dir, "b.tsv", "Na23\tA\t41.3\tx\tAraGWAS-Phenotype_Associations\n");

        let dataset = EdgeIngester::new().ingest(&[a, b]).unwrap();
        let keys: Vec<&str> = dataset.nodes.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, ["A", "B", "C", "Na23"]);
        assert_eq!(dataset.edge_count(), 3);
        assert_eq!(dataset.edges()[1].edge_type, EdgeType::DomainCoOccur);
        assert_eq!(dataset.edges()[2].edge_type, EdgeType::PhenoAssn);
    }

    #[test]
    fn reingesting_yields_identical_edges() {
        let dir = TempDir::new().unwrap();
        let file = edge_file(&dir, "e.tsv", "A\tB\t0.5\tx\tAraNetv2-HT_high-throughput-ppi\n");
        let first = EdgeIngester::new().ingest(std::slice::from_ref(&file)).unwrap();
        let second = EdgeIngester::new().ingest(&[file]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.edges()[0].key, "A__B__ppi_hithru__0.5");
    }

    #[test]
    fn unknown_layer_label_fails() {
        let dir = TempDir::new().unwrap();
        let file = edge_file(
            &dir,
            "merged_edges.tsv",
            "A\tB\t1\tx\tAraNetv2-LC_lit-curated-ppi\nA\tB\t1\tx\tAraGWAS-Some-Old-Rubbish-I-Made-Up\n",
        );
        let err = EdgeIngester::new().ingest(&[file]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "merged_edges.tsv line 3: invalid edge type: AraGWAS-Some-Old-Rubbish-I-Made-Up"
        );
    }

    #[test]
    fn unparsable_score_fails() {
        let dir = TempDir::new().unwrap();
        for bad in ["high", "NaN", ""] {
            let file = edge_file(&dir, "e.tsv", &format!("A\tB\t{bad}\tx\tAraNetv2-LC_lit-curated-ppi\n"));
            let err = EdgeIngester::new().ingest(&[file]).unwrap_err();
            assert!(
                matches!(err, IngestError::InvalidScore { line: 2, .. }),
                "score {bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn empty_files_give_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let empty = descriptor(&dir, "empty.tsv", DataType::Edge, None, "");
        let header_only = edge_file(&dir, "header.tsv", "");
        let dataset = EdgeIngester::new().ingest(&[empty, header_only]).unwrap();
        assert_eq!(serde_json::to_value(&dataset).unwrap(), json!({"nodes": [], "edges": []}));
    }
}
