//! Node metadata files: one comma-separated row of attributes per node

use super::reader::{Row, TabularFormat, TabularReader};
use super::traits::Ingester;
use super::{IngestError, IngestResult};
use crate::graph::{Dataset, Node, NodeMetadata, NodeType};
use crate::manifest::{DataType, FileDescriptor};
use tracing::info;

/// Column positions in a node metadata file
pub mod columns {
    pub const NODE_ID: usize = 0;
    pub const NODE_TYPE: usize = 1;
    pub const TRANSCRIPT: usize = 2;
    pub const GENE_SYMBOL: usize = 3;
    pub const GENE_FULL_NAME: usize = 4;
    pub const GENE_MODEL_TYPE: usize = 5;
    pub const TAIR_COMPUTATIONAL_DESC: usize = 6;
    pub const TAIR_CURATOR_SUMMARY: usize = 7;
    pub const TAIR_SHORT_DESC: usize = 8;
    pub const GO_DESCR: usize = 9;
    pub const GO_TERMS: usize = 10;
    pub const MAPMAN_BIN: usize = 11;
    pub const MAPMAN_NAME: usize = 12;
    pub const MAPMAN_DESC: usize = 13;
    pub const PHENO_ARAGWAS_ID: usize = 14;
    pub const PHENO_DESC1: usize = 15;
    pub const PHENO_DESC2: usize = 16;
    pub const PHENO_DESC3: usize = 17;
    pub const PHENO_REF: usize = 18;
    pub const USER_NOTES: usize = 19;
    pub const COUNT: usize = 20;
}

pub const NODE_FORMAT: TabularFormat = TabularFormat::fixed(b',', columns::COUNT);

/// Split a comma-separated GO term list; an empty field is an empty list
pub fn split_go_terms(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(',').map(|t| t.trim().to_string()).collect()
}

/// Builds fully attributed node records
#[derive(Debug, Default)]
pub struct NodeMetadataIngester;

impl NodeMetadataIngester {
    pub fn new() -> Self {
        Self
    }

    fn parse_row(file: &FileDescriptor, row: &Row) -> IngestResult<Node> {
        use columns::*;

        let value = row.get(NODE_TYPE);
        let node_type = value
            .parse::<NodeType>()
            .map_err(|value| IngestError::InvalidNodeType {
                file: file.path().to_string(),
                line: row.line,
                value,
            })?;

        let text = |column: usize| row.get(column).to_string();
        let metadata = NodeMetadata {
            node_type,
            transcript: text(TRANSCRIPT),
            gene_symbol: text(GENE_SYMBOL),
            gene_full_name: text(GENE_FULL_NAME),
            gene_model_type: text(GENE_MODEL_TYPE),
            tair_computational_desc: text(TAIR_COMPUTATIONAL_DESC),
            tair_curator_summary: text(TAIR_CURATOR_SUMMARY),
            tair_short_desc: text(TAIR_SHORT_DESC),
            go_descr: text(GO_DESCR),
            go_terms: split_go_terms(row.get(GO_TERMS)),
            mapman_bin: text(MAPMAN_BIN),
            mapman_name: text(MAPMAN_NAME),
            mapman_desc: text(MAPMAN_DESC),
            pheno_aragwas_id: text(PHENO_ARAGWAS_ID),
            pheno_desc1: text(PHENO_DESC1),
            pheno_desc2: text(PHENO_DESC2),
            pheno_desc3: text(PHENO_DESC3),
            pheno_ref: text(PHENO_REF),
            user_notes: text(USER_NOTES),
        };

        Ok(Node::new(row.get(NODE_ID)).with_metadata(metadata))
    }
}

impl Ingester for NodeMetadataIngester {
    fn id(&self) -> &str {
        "node_metadata"
    }

    fn data_type(&self) -> DataType {
        DataType::Node
    }

    fn ingest(&self, files: &[FileDescriptor]) -> IngestResult<Dataset> {
        let mut nodes = Vec::new();

        for file in files {
            let before = nodes.len();
            for row in TabularReader::open(file, NODE_FORMAT)? {
                nodes.push(Self::parse_row(file, &row?)?);
            }
            info!(file = file.path(), nodes = nodes.len() - before, "read node metadata file");
        }

        Ok(Dataset::nodes(nodes))
    }
}
