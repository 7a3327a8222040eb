//! Network record types

mod dataset;
mod edge;
mod node;

pub use dataset::Dataset;
pub use edge::{Edge, EdgeType, LAYER_LABELS};
pub use node::{Node, NodeKey, NodeMetadata, NodeType};
