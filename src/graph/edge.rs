//! Edge records: scored relationships between two nodes

use super::node::NodeKey;
use serde::{Deserialize, Serialize};

/// Canonical interaction types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    PhenoAssn,
    GeneCoexpr,
    DomainCoOccur,
    PpiHithru,
    PpiLiter,
}

/// Source-layer labels as they appear in the `layer_descrip` column,
/// paired with the canonical type each one maps to.
pub const LAYER_LABELS: [(&str, EdgeType); 5] = [
    ("AraGWAS-Phenotype_Associations", EdgeType::PhenoAssn),
    ("AraNetv2-CX_pairwise-gene-coexpression", EdgeType::GeneCoexpr),
    ("AraNetv2-DC_domain-co-occurrence", EdgeType::DomainCoOccur),
    ("AraNetv2-HT_high-throughput-ppi", EdgeType::PpiHithru),
    ("AraNetv2-LC_lit-curated-ppi", EdgeType::PpiLiter),
];

impl EdgeType {
    /// Map a long-form source-layer label to its canonical type
    pub fn from_layer_label(label: &str) -> Option<Self> {
        LAYER_LABELS
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, edge_type)| *edge_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhenoAssn => "pheno_assn",
            Self::GeneCoexpr => "gene_coexpr",
            Self::DomainCoOccur => "domain_co_occur",
            Self::PpiHithru => "ppi_hithru",
            Self::PpiLiter => "ppi_liter",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, scored edge document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Deterministic key, see [`Edge::make_key`]
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_from")]
    pub from: NodeKey,
    #[serde(rename = "_to")]
    pub to: NodeKey,
    pub score: f64,
    pub edge_type: EdgeType,
}

impl Edge {
    /// Build an edge; `score_text` is the score exactly as written in the
    /// source file and is what the key is derived from.
    pub fn new(
        from: impl Into<NodeKey>,
        to: impl Into<NodeKey>,
        edge_type: EdgeType,
        score: f64,
        score_text: &str,
    ) -> Self {
        let from = from.into();
        let to = to.into();
        Self {
            key: Self::make_key(&from, &to, edge_type, score_text),
            from,
            to,
            score,
            edge_type,
        }
    }

    /// `from__to__edge_type__score`
    pub fn make_key(from: &NodeKey, to: &NodeKey, edge_type: EdgeType, score_text: &str) -> String {
        format!("{}__{}__{}__{}", from, to, edge_type, score_text)
    }
}
