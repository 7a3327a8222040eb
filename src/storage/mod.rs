//! Storage backends for loaded records
//!
//! Record batches are persisted through the `DocumentStore` trait.
//! The bundled implementation is `SqliteStore`.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{
    to_documents, DocumentStore, OnDuplicate, OpenStore, SaveSummary, StorageError, StorageResult,
};
