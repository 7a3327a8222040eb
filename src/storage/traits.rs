//! Storage trait definitions

use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document in {collection} has no string _key")]
    MissingKey { collection: String },

    #[error("Duplicate key {key} in {collection}")]
    Duplicate { collection: String, key: String },

    #[error("Store connection lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// What to do when a saved document's `_key` already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnDuplicate {
    /// Merge top-level fields into the stored document
    #[default]
    Update,
    /// Overwrite the stored document
    Replace,
    /// Keep the stored document
    Ignore,
    /// Abort the whole batch
    Error,
}

impl FromStr for OnDuplicate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "update" => Ok(Self::Update),
            "replace" => Ok(Self::Replace),
            "ignore" => Ok(Self::Ignore),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown on_duplicate policy: {}", other)),
        }
    }
}

/// Counts from one `save_docs` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaveSummary {
    pub created: usize,
    pub updated: usize,
    pub ignored: usize,
}

impl SaveSummary {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.ignored
    }
}

/// Trait for document store backends
///
/// Documents are flat JSON objects identified by a string `_key`, grouped
/// into named collections. A batch is applied atomically: if any document
/// fails, none of the batch is kept.
pub trait DocumentStore: Send + Sync {
    /// Insert or merge a batch of documents
    fn save_docs(
        &self,
        collection: &str,
        docs: &[Value],
        on_duplicate: OnDuplicate,
    ) -> StorageResult<SaveSummary>;

    /// Load one document by key
    fn get_doc(&self, collection: &str, key: &str) -> StorageResult<Option<Value>>;

    /// All documents in a collection, ordered by key
    fn list_docs(&self, collection: &str) -> StorageResult<Vec<Value>>;

    /// Number of documents in a collection
    fn count(&self, collection: &str) -> StorageResult<usize>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: DocumentStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}

/// Serialize typed records into documents
pub fn to_documents<T: Serialize>(records: &[T]) -> StorageResult<Vec<Value>> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(StorageError::from))
        .collect()
}
