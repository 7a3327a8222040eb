//! Common test utilities for loader integration tests
//!
//! Builds throwaway release directories (manifest plus data files) so each
//! test describes exactly the files it needs.

pub mod release;

#[allow(unused_imports)]
pub use release::{sample_release, Release, EDGE_HEADER, NODE_HEADER};
