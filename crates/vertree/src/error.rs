//! Error types for vertree operations.
//!
//! [`VertreeError`] wraps the failures of every stage of the pipeline:
//! measuring labels, building the tree, placing nodes and rendering.

use thiserror::Error;

use vertree_core::metrics::MetricsError;

use crate::{export::ExportError, layout::LayoutError, tree::BuildError};

/// The main error type for vertree operations.
#[derive(Debug, Error)]
pub enum VertreeError {
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Tree error: {0}")]
    Build(#[from] BuildError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}
