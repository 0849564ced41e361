//! Error type of the vertree CLI.

use std::io;

use thiserror::Error;

use vertree::VertreeError;

use crate::{config::ConfigError, history::HistoryError};

/// Everything that can stop a CLI run.
///
/// The `History` variant keeps the history file's source so diagnostics can
/// point into it.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{err}")]
    History { err: HistoryError, src: String },

    #[error(transparent)]
    Vertree(#[from] VertreeError),
}

impl CliError {
    /// Create a new `History` error with the associated source.
    pub fn new_history_error(err: HistoryError, src: impl Into<String>) -> Self {
        Self::History {
            err,
            src: src.into(),
        }
    }
}
