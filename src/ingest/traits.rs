//! Ingester trait: the contract each ingestion pass implements

use super::IngestResult;
use crate::graph::Dataset;
use crate::manifest::{DataType, FileDescriptor, Manifest};

/// One ingestion pass.
///
/// An ingester declares which manifest data type it consumes and turns the
/// files of that type into a single dataset.
pub trait Ingester: Send + Sync {
    /// Identifier used in logs
    fn id(&self) -> &str;

    /// The manifest data type this ingester consumes
    fn data_type(&self) -> DataType;

    /// Read `files` in order and produce one combined dataset
    fn ingest(&self, files: &[FileDescriptor]) -> IngestResult<Dataset>;

    /// Run over every file of this ingester's data type
    fn ingest_manifest(&self, manifest: &Manifest) -> IngestResult<Dataset> {
        self.ingest(manifest.files(self.data_type()))
    }
}
