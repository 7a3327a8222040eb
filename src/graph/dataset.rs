//! Dataset: the output unit of one ingestion pass

use super::edge::Edge;
use super::node::{Node, NodeKey};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Records produced by one ingestion pass
///
/// The edge pass always carries an `edges` list (possibly empty); the
/// metadata and cluster passes carry only `nodes`, and their serialized
/// form has no `edges` key at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
}

impl Dataset {
    /// A node-only dataset
    pub fn nodes(nodes: Vec<Node>) -> Self {
        Self { nodes, edges: None }
    }

    /// A dataset carrying both nodes and edges
    pub fn with_edges(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges: Some(edges),
        }
    }

    /// Edges in this dataset; empty for node-only datasets
    pub fn edges(&self) -> &[Edge] {
        self.edges.as_deref().unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Distinct node keys
    pub fn node_keys(&self) -> HashSet<&NodeKey> {
        self.nodes.iter().map(|n| &n.key).collect()
    }

    /// No nodes and no edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges().is_empty()
    }
}
