//! Node records: genes and phenotypes in the interaction network

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Unique identifier for a node (the document `_key`)
///
/// The same key joins edge endpoints, node metadata rows and cluster
/// members across independently authored files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Node classification; the only two kinds the network knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Gene,
    Pheno,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gene => "gene",
            Self::Pheno => "pheno",
        }
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene" => Ok(Self::Gene),
            "pheno" => Ok(Self::Pheno),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Biological and semantic attributes from a node metadata row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub node_type: NodeType,
    pub transcript: String,
    pub gene_symbol: String,
    pub gene_full_name: String,
    pub gene_model_type: String,
    pub tair_computational_desc: String,
    pub tair_curator_summary: String,
    pub tair_short_desc: String,
    pub go_descr: String,
    /// GO term identifiers, in file order
    pub go_terms: Vec<String>,
    pub mapman_bin: String,
    pub mapman_name: String,
    pub mapman_desc: String,
    pub pheno_aragwas_id: String,
    pub pheno_desc1: String,
    pub pheno_desc2: String,
    pub pheno_desc3: String,
    pub pheno_ref: String,
    pub user_notes: String,
}

/// A node document
///
/// Each ingestion pass emits the subset of fields it knows about: the edge
/// pass emits bare keys, the metadata pass emits `metadata`, the cluster
/// pass emits `clusters`. Passes are never merged in memory; the persister
/// applies them as independent upserts keyed by `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "_key")]
    pub key: NodeKey,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clusters: Option<BTreeSet<String>>,
}

impl Node {
    /// A node carrying only its key
    pub fn new(key: impl Into<NodeKey>) -> Self {
        Self {
            key: key.into(),
            metadata: None,
            clusters: None,
        }
    }

    pub fn with_metadata(mut self, metadata: NodeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_clusters(mut self, clusters: BTreeSet<String>) -> Self {
        self.clusters = Some(clusters);
        self
    }

    pub fn node_type(&self) -> Option<NodeType> {
        self.metadata.as_ref().map(|m| m.node_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_type_parses_known_values_only() {
        assert_eq!("gene".parse::<NodeType>(), Ok(NodeType::Gene));
        assert_eq!("pheno".parse::<NodeType>(), Ok(NodeType::Pheno));
        assert_eq!("Gene".parse::<NodeType>(), Err("Gene".to_string()));
        assert!("".parse::<NodeType>().is_err());
    }

    #[test]
    fn bare_node_serializes_as_key_only() {
        let node = Node::new("AT1G01370");
        assert_eq!(serde_json::to_value(&node).unwrap(), json!({"_key": "AT1G01370"}));
    }

    #[test]
    fn cluster_node_serializes_sorted_memberships() {
        let clusters: BTreeSet<String> = ["markov_i4:3", "markov_i2:6"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let node = Node::new("AT1G01370").with_clusters(clusters);
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"_key": "AT1G01370", "clusters": ["markov_i2:6", "markov_i4:3"]})
        );
    }
}
