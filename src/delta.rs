//! Referential gaps between the edge, node metadata and cluster datasets

use crate::graph::{Dataset, NodeKey};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// What a delta check found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeltaReport {
    /// Nodes with cluster data but no metadata row
    pub clusters_without_metadata: BTreeSet<NodeKey>,
    /// Nodes referenced by edges but with no metadata row
    pub edges_without_metadata: BTreeSet<NodeKey>,
    pub edge_count: usize,
    /// Distinct nodes across all three datasets
    pub node_count: usize,
}

impl DeltaReport {
    /// True when every referenced node has metadata
    pub fn is_consistent(&self) -> bool {
        self.clusters_without_metadata.is_empty() && self.edges_without_metadata.is_empty()
    }
}

impl std::fmt::Display for DeltaReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let list = |keys: &BTreeSet<NodeKey>| {
            keys.iter().map(NodeKey::as_str).collect::<Vec<_>>().join(", ")
        };
        if !self.clusters_without_metadata.is_empty() {
            writeln!(
                f,
                "clusters with no node metadata: {}",
                list(&self.clusters_without_metadata)
            )?;
        }
        if !self.edges_without_metadata.is_empty() {
            writeln!(f, "edges with no node metadata: {}", list(&self.edges_without_metadata))?;
        }
        writeln!(f, "Dataset contains {} edges", self.edge_count)?;
        write!(f, "Dataset contains {} nodes", self.node_count)
    }
}

/// Compare the three datasets of one release
///
/// Never fails: every set difference is well-defined, including over empty
/// datasets.
pub fn analyze(edge_data: &Dataset, node_metadata: &Dataset, cluster_data: &Dataset) -> DeltaReport {
    let edge_nodes = edge_data.node_keys();
    let metadata_nodes = node_metadata.node_keys();
    let cluster_nodes = cluster_data.node_keys();

    let missing = |keys: &HashSet<&NodeKey>| -> BTreeSet<NodeKey> {
        keys.difference(&metadata_nodes).map(|k| (*k).clone()).collect()
    };

    let all_nodes: HashSet<&NodeKey> = edge_nodes
        .iter()
        .chain(metadata_nodes.iter())
        .chain(cluster_nodes.iter())
        .copied()
        .collect();

    DeltaReport {
        clusters_without_metadata: missing(&cluster_nodes),
        edges_without_metadata: missing(&edge_nodes),
        edge_count: edge_data.edge_count(),
        node_count: all_nodes.len(),
    }
}
