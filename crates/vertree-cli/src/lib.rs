//! CLI logic for the vertree layout tool.
//!
//! Reads a version history file, lays out its version tree and writes the
//! result as SVG.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod history;

pub use args::Args;
pub use error::CliError;
pub use history::{History, HistoryError};

use std::fs;

use log::{info, warn};

use vertree::LayoutBuilder;

/// Run the vertree CLI application
///
/// This function lays out the version history in the input file and writes
/// the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid history files
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing version history"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let history =
        History::parse(&source).map_err(|err| CliError::new_history_error(err, source.as_str()))?;

    let builder = LayoutBuilder::new(app_config);
    let layout = builder.layout(history.graph(), history.tags())?;

    for (parent, child) in layout.dropped_edges() {
        warn!(parent = parent.get(), child = child.get(); "Edge not drawn, version already has a parent");
    }
    if !layout.detached().is_empty() {
        warn!(
            versions:? = layout.detached();
            "Versions unreachable from the root were left out"
        );
    }

    let svg = builder.render_svg(&layout)?;
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
