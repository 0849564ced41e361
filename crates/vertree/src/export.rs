//! Rendering laid-out version trees to static formats.

pub mod svg;

use thiserror::Error;

/// Errors raised while rendering a layout.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
