//! Run configuration
//!
//! A `LoadConfig` is built once per run and never changes afterwards. It
//! owns the validated manifest, so every ingester sees the same resolved
//! file lists.

use crate::manifest::{DataType, FileDescriptor, Manifest, ManifestError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the data root
pub const ROOT_DATA_PATH_ENV: &str = "RES_ROOT_DATA_PATH";

pub const DEFAULT_NODE_COLLECTION: &str = "djornl_node";
pub const DEFAULT_EDGE_COLLECTION: &str = "djornl_edge";

/// Errors that can occur while building the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required env var: {0}")]
    MissingEnv(String),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Immutable configuration for one loading run
#[derive(Debug, Clone)]
pub struct LoadConfig {
    manifest: Manifest,
    node_collection: String,
    edge_collection: String,
}

impl LoadConfig {
    /// Validate the manifest under `root_data_path`
    pub fn new(root_data_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            manifest: Manifest::load(root_data_path)?,
            node_collection: DEFAULT_NODE_COLLECTION.to_string(),
            edge_collection: DEFAULT_EDGE_COLLECTION.to_string(),
        })
    }

    /// Take the data root from `RES_ROOT_DATA_PATH`
    pub fn from_env() -> Result<Self, ConfigError> {
        let root = std::env::var_os(ROOT_DATA_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::MissingEnv(ROOT_DATA_PATH_ENV.to_string()))?;
        Self::new(root)
    }

    /// Override the target collection names
    pub fn with_collections(mut self, node: impl Into<String>, edge: impl Into<String>) -> Self {
        self.node_collection = node.into();
        self.edge_collection = edge.into();
        self
    }

    pub fn root_data_path(&self) -> &Path {
        self.manifest.root()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn files(&self, data_type: DataType) -> &[FileDescriptor] {
        self.manifest.files(data_type)
    }

    pub fn node_collection(&self) -> &str {
        &self.node_collection
    }

    pub fn edge_collection(&self) -> &str {
        &self.edge_collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_and_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.yaml"), "[]").unwrap();

        let config = LoadConfig::new(dir.path()).unwrap();
        assert_eq!(config.node_collection(), "djornl_node");
        assert_eq!(config.edge_collection(), "djornl_edge");
        assert_eq!(config.root_data_path(), dir.path());
        assert!(config.files(DataType::Edge).is_empty());

        let config = config.with_collections("test_node", "test_edge");
        assert_eq!(config.node_collection(), "test_node");
        assert_eq!(config.edge_collection(), "test_edge");
    }

    #[test]
    fn manifest_errors_pass_through() {
        let dir = TempDir::new().unwrap();
        let err = LoadConfig::new(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Manifest(ManifestError::NotFound { .. })));
        assert!(err.to_string().starts_with("No manifest file found at"));
    }
}
