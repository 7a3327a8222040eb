//! djornl: gene/phenotype network loader
//!
//! Reads one release of the Dan Jacobson/ORNL group's Arabidopsis network
//! (node metadata, scored edges and cluster memberships spread over many
//! delimited files) and consolidates it into document records ready for a
//! document store.
//!
//! # Core Concepts
//!
//! - **Manifest**: `manifest.yaml` at the data root lists every file with its
//!   data type and parsing hints
//! - **Passes**: edges, node metadata and clusters are ingested independently,
//!   each into its own [`Dataset`]
//! - **Delta**: a diagnostic comparison of the three datasets
//!
//! # Example
//!
//! ```no_run
//! use djornl::{LoadConfig, NetworkLoader};
//!
//! let config = LoadConfig::new("/data/djornl/release").unwrap();
//! let loader = NetworkLoader::new(config);
//! let edges = loader.load_edges().unwrap();
//! println!("{} edges", edges.edge_count());
//! ```

pub mod config;
pub mod delta;
mod graph;
pub mod ingest;
mod loader;
pub mod manifest;
pub mod storage;

pub use config::{ConfigError, LoadConfig};
pub use delta::DeltaReport;
pub use graph::{Dataset, Edge, EdgeType, Node, NodeKey, NodeMetadata, NodeType, LAYER_LABELS};
pub use ingest::{IngestError, IngestResult, Ingester};
pub use loader::{LoadSummary, LoaderError, LoaderResult, NetworkLoader};
pub use manifest::{DataType, FileDescriptor, Manifest, ManifestEntry, ManifestError};
pub use storage::{DocumentStore, OnDuplicate, OpenStore, SqliteStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
