//! Manifest loading and validation
//!
//! The manifest (`manifest.yaml` at the data root) lists every file in a
//! release with its data type and parsing hints. Loading it resolves each
//! listed path to an existing regular file and partitions the results by
//! data type, preserving manifest order within each partition.

mod entry;
mod schema;

pub use entry::{DataType, FileDescriptor, ManifestEntry};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the manifest, relative to the data root
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// Errors raised while loading the manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("No manifest file found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error(
        "The manifest file failed validation with the following errors:\n{}",
        .violations.join("\n")
    )]
    Invalid {
        path: PathBuf,
        violations: Vec<String>,
    },

    #[error("{}: file does not exist", .path.display())]
    FileMissing { path: PathBuf },

    #[error("{}: not a file", .path.display())]
    NotAFile { path: PathBuf },

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// A validated manifest with every listed file resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    root: PathBuf,
    node_files: Vec<FileDescriptor>,
    edge_files: Vec<FileDescriptor>,
    cluster_files: Vec<FileDescriptor>,
}

impl Manifest {
    /// Read and validate `<root>/manifest.yaml`
    ///
    /// Always reads from disk; nothing is cached between calls.
    pub fn load(root: impl AsRef<Path>) -> ManifestResult<Self> {
        let root = std::path::absolute(root.as_ref()).map_err(|source| ManifestError::Io {
            path: root.as_ref().join(MANIFEST_FILE),
            source,
        })?;
        let manifest_path = root.join(MANIFEST_FILE);

        let text = match std::fs::read_to_string(&manifest_path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound { path: manifest_path });
            }
            Err(source) => {
                return Err(ManifestError::Io {
                    path: manifest_path,
                    source,
                });
            }
        };

        let entries = Self::parse(&manifest_path, &text)?;
        Self::resolve(root, entries)
    }

    fn parse(manifest_path: &Path, text: &str) -> ManifestResult<Vec<ManifestEntry>> {
        let doc: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| ManifestError::Invalid {
            path: manifest_path.to_path_buf(),
            violations: vec![format!("not valid YAML: {}", e)],
        })?;

        schema::validate(&doc).map_err(|violations| ManifestError::Invalid {
            path: manifest_path.to_path_buf(),
            violations,
        })
    }

    fn resolve(root: PathBuf, entries: Vec<ManifestEntry>) -> ManifestResult<Self> {
        let mut manifest = Self {
            root,
            node_files: Vec::new(),
            edge_files: Vec::new(),
            cluster_files: Vec::new(),
        };

        for entry in entries {
            let file_path = manifest.root.join(&entry.path);

            if !file_path.exists() {
                return Err(ManifestError::FileMissing { path: file_path });
            }
            if !file_path.is_file() {
                return Err(ManifestError::NotAFile { path: file_path });
            }

            let file = FileDescriptor::new(entry, file_path);
            let files = match file.data_type() {
                DataType::Node => &mut manifest.node_files,
                DataType::Edge => &mut manifest.edge_files,
                DataType::Cluster => &mut manifest.cluster_files,
            };
            files.push(file);
        }

        Ok(manifest)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn node_files(&self) -> &[FileDescriptor] {
        &self.node_files
    }

    pub fn edge_files(&self) -> &[FileDescriptor] {
        &self.edge_files
    }

    pub fn cluster_files(&self) -> &[FileDescriptor] {
        &self.cluster_files
    }

    /// Files of one data type, in manifest order
    pub fn files(&self, data_type: DataType) -> &[FileDescriptor] {
        match data_type {
            DataType::Node => &self.node_files,
            DataType::Edge => &self.edge_files,
            DataType::Cluster => &self.cluster_files,
        }
    }

    pub fn file_count(&self) -> usize {
        self.node_files.len() + self.edge_files.len() + self.cluster_files.len()
    }
}
