//! Manifest entries and the file descriptors resolved from them

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What kind of records a listed file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Node,
    Edge,
    Cluster,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Node, DataType::Edge, DataType::Cluster];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Cluster => "cluster",
        }
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One file listed in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the data root
    pub path: String,
    pub data_type: DataType,
    /// Cluster-id namespace; present on every cluster entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A manifest entry whose path resolved to an existing regular file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub entry: ManifestEntry,
    file_path: PathBuf,
}

impl FileDescriptor {
    pub(crate) fn new(entry: ManifestEntry, file_path: PathBuf) -> Self {
        Self { entry, file_path }
    }

    /// The manifest-relative path, used to label errors
    pub fn path(&self) -> &str {
        &self.entry.path
    }

    /// The resolved location on disk
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn data_type(&self) -> DataType {
        self.entry.data_type
    }

    pub fn prefix(&self) -> Option<&str> {
        self.entry.prefix.as_deref()
    }
}
