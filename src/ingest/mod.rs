//! Ingestion passes over the manifest's data files
//!
//! Each pass reads every file of one data type, in manifest order, and
//! produces a standalone [`Dataset`](crate::graph::Dataset). Passes share no
//! state and fail fast: the first bad row aborts the whole pass.

mod clusters;
mod edges;
mod nodes;
mod reader;
mod traits;

pub use clusters::{parse_cluster_label, ClusterIngester, CLUSTER_FORMAT};
pub use edges::{EdgeIngester, EDGE_FORMAT};
pub use nodes::{split_go_terms, NodeMetadataIngester, NODE_FORMAT};
pub use reader::{Row, TabularFormat, TabularReader};
pub use traits::Ingester;

use thiserror::Error;

/// Errors raised while reading data files
///
/// `file` is always the manifest-relative path and `line` is 1-based.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{file} line {line}: expected {expected} cols, found {found}")]
    ColumnCountMismatch {
        file: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{file} line {line}: invalid edge type: {label}")]
    InvalidEdgeType { file: String, line: u64, label: String },

    #[error("{file} line {line}: invalid node type: {value}")]
    InvalidNodeType { file: String, line: u64, value: String },

    #[error("{file} line {line}: invalid score: {value}")]
    InvalidScore { file: String, line: u64, value: String },

    #[error("{file} line {line}: invalid cluster label: {label}")]
    InvalidClusterLabel { file: String, line: u64, label: String },

    #[error("{file}: cluster file has no prefix")]
    MissingPrefix { file: String },

    #[error("{file}: {source}")]
    Read {
        file: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion passes
pub type IngestResult<T> = Result<T, IngestError>;
