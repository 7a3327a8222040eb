//! Cluster files: one cluster per row, label first, members after
//!
//! ```text
//! Cluster6	AT1G01370	AT1G57820
//! ```
//!
//! The manifest prefix namespaces the numeric label, so `Cluster6` in a
//! file with prefix `markov_i2` becomes cluster id `markov_i2:6`.

use super::reader::{Row, TabularFormat, TabularReader};
use super::traits::Ingester;
use super::{IngestError, IngestResult};
use crate::graph::{Dataset, Node, NodeKey};
use crate::manifest::{DataType, FileDescriptor};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// Column positions in a cluster file
pub mod columns {
    pub const LABEL: usize = 0;
    pub const FIRST_MEMBER: usize = 1;
}

pub const CLUSTER_FORMAT: TabularFormat = TabularFormat::ragged(b'\t');

const LABEL_PREFIX: &str = "Cluster";

/// Numeric id from a `Cluster<N>` label
pub fn parse_cluster_label(label: &str) -> Option<&str> {
    label
        .strip_prefix(LABEL_PREFIX)
        .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Memberships per node, nodes in first-seen order
#[derive(Debug, Default)]
struct MembershipIndex {
    positions: HashMap<NodeKey, usize>,
    nodes: Vec<(NodeKey, BTreeSet<String>)>,
}

impl MembershipIndex {
    fn add(&mut self, key: &str, cluster_id: &str) {
        let key = NodeKey::from(key);
        let position = match self.positions.get(&key) {
            Some(&p) => p,
            None => {
                self.nodes.push((key.clone(), BTreeSet::new()));
                self.positions.insert(key, self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        self.nodes[position].1.insert(cluster_id.to_string());
    }

    fn into_nodes(self) -> Vec<Node> {
        self.nodes
            .into_iter()
            .map(|(key, clusters)| Node::new(key).with_clusters(clusters))
            .collect()
    }
}

/// Annotates nodes with the clusters they belong to
#[derive(Debug, Default)]
pub struct ClusterIngester;

impl ClusterIngester {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(file: &FileDescriptor, prefix: &str, row: &Row, index: &mut MembershipIndex) -> IngestResult<()> {
        let label = row.get(columns::LABEL);
        let number = parse_cluster_label(label).ok_or_else(|| IngestError::InvalidClusterLabel {
            file: file.path().to_string(),
            line: row.line,
            label: label.to_string(),
        })?;
        let cluster_id = format!("{}:{}", prefix, number);

        for member in row.fields.iter().skip(columns::FIRST_MEMBER) {
            if !member.is_empty() {
                index.add(member, &cluster_id);
            }
        }
        Ok(())
    }
}

impl Ingester for ClusterIngester {
    fn id(&self) -> &str {
        "clusters"
    }

    fn data_type(&self) -> DataType {
        DataType::Cluster
    }

    fn ingest(&self, files: &[FileDescriptor]) -> IngestResult<Dataset> {
        let mut index = MembershipIndex::default();

        for file in files {
            let prefix = file.prefix().ok_or_else(|| IngestError::MissingPrefix {
                file: file.path().to_string(),
            })?;
            let mut clusters = 0usize;
            for row in TabularReader::open(file, CLUSTER_FORMAT)? {
                Self::parse_row(file, prefix, &row?, &mut index)?;
                clusters += 1;
            }
            info!(file = file.path(), prefix, clusters, "read cluster file");
        }

        Ok(Dataset::nodes(index.into_nodes()))
    }
}
