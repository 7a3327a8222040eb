//! NetworkLoader: runs the ingestion passes and hands datasets to a store
//!
//! Pass order is fixed (edges, node metadata, clusters) so that the first
//! error reported is deterministic. The passes themselves are independent.

use crate::config::{ConfigError, LoadConfig};
use crate::delta::{self, DeltaReport};
use crate::graph::Dataset;
use crate::ingest::{ClusterIngester, EdgeIngester, IngestError, Ingester, NodeMetadataIngester};
use crate::storage::{to_documents, DocumentStore, OnDuplicate, SaveSummary, StorageError};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from a full loading run
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Documents written per collection during `load_data`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub collections: BTreeMap<String, SaveSummary>,
}

impl LoadSummary {
    fn record(&mut self, collection: &str, saved: SaveSummary) {
        let entry = self.collections.entry(collection.to_string()).or_default();
        entry.created += saved.created;
        entry.updated += saved.updated;
        entry.ignored += saved.ignored;
    }
}

/// Loads one release of the network
pub struct NetworkLoader {
    config: LoadConfig,
    edges: EdgeIngester,
    nodes: NodeMetadataIngester,
    clusters: ClusterIngester,
}

impl NetworkLoader {
    pub fn new(config: LoadConfig) -> Self {
        Self {
            config,
            edges: EdgeIngester::new(),
            nodes: NodeMetadataIngester::new(),
            clusters: ClusterIngester::new(),
        }
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    fn run(&self, ingester: &dyn Ingester) -> LoaderResult<Dataset> {
        let dataset = ingester.ingest_manifest(self.config.manifest())?;
        info!(
            pass = ingester.id(),
            nodes = dataset.nodes.len(),
            edges = dataset.edge_count(),
            "ingestion pass complete"
        );
        Ok(dataset)
    }

    /// Edges plus a bare node for every endpoint
    pub fn load_edges(&self) -> LoaderResult<Dataset> {
        self.run(&self.edges)
    }

    /// Fully attributed nodes
    pub fn load_node_metadata(&self) -> LoaderResult<Dataset> {
        self.run(&self.nodes)
    }

    /// Nodes annotated with cluster memberships
    pub fn load_cluster_data(&self) -> LoaderResult<Dataset> {
        self.run(&self.clusters)
    }

    /// Save a dataset's nodes and edges to their collections.
    ///
    /// Empty record lists are skipped rather than sent.
    pub fn save_dataset(
        &self,
        store: &dyn DocumentStore,
        dataset: &Dataset,
        on_duplicate: OnDuplicate,
    ) -> LoaderResult<LoadSummary> {
        let mut summary = LoadSummary::default();
        if dataset.is_empty() {
            return Ok(summary);
        }

        if !dataset.nodes.is_empty() {
            let collection = self.config.node_collection();
            let saved = store.save_docs(collection, &to_documents(&dataset.nodes)?, on_duplicate)?;
            info!(collection, saved = saved.total(), "saved nodes");
            summary.record(collection, saved);
        }

        if !dataset.edges().is_empty() {
            let collection = self.config.edge_collection();
            let saved = store.save_docs(collection, &to_documents(dataset.edges())?, on_duplicate)?;
            info!(collection, saved = saved.total(), "saved edges");
            summary.record(collection, saved);
        }

        Ok(summary)
    }

    /// Run every pass and save each dataset as it is produced
    pub fn load_data(&self, store: &dyn DocumentStore) -> LoaderResult<LoadSummary> {
        let mut summary = LoadSummary::default();
        let passes: [&dyn Ingester; 3] = [&self.edges, &self.nodes, &self.clusters];
        for ingester in passes {
            let dataset = self.run(ingester)?;
            for (collection, saved) in self.save_dataset(store, &dataset, OnDuplicate::Update)?.collections {
                summary.record(&collection, saved);
            }
        }
        Ok(summary)
    }

    /// Run every pass and report referential gaps between them
    pub fn check_data_delta(&self) -> LoaderResult<DeltaReport> {
        let edge_data = self.load_edges()?;
        let node_metadata = self.load_node_metadata()?;
        let cluster_data = self.load_cluster_data()?;

        let report = delta::analyze(&edge_data, &node_metadata, &cluster_data);
        if !report.clusters_without_metadata.is_empty() {
            warn!(
                count = report.clusters_without_metadata.len(),
                "clusters with no node metadata"
            );
        }
        if !report.edges_without_metadata.is_empty() {
            warn!(
                count = report.edges_without_metadata.len(),
                "edges with no node metadata"
            );
        }
        info!(edges = report.edge_count, nodes = report.node_count, "delta check complete");
        Ok(report)
    }
}
