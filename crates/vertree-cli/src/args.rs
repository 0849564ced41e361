//! Command-line argument definitions for the vertree CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

/// Command-line arguments for the vertree layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input version history (TOML)
    #[arg(help = "Path to the version history file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The `--log-level` filter, or `None` if it names no level
    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(&self.log_level).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["vertree", "history.toml"]);

        assert_eq!(args.input, "history.toml");
        assert_eq!(args.output, "out.svg");
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::parse_from([
            "vertree",
            "history.toml",
            "-o",
            "tree.svg",
            "-c",
            "vertree.toml",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.output, "tree.svg");
        assert_eq!(args.config.as_deref(), Some("vertree.toml"));
        assert_eq!(args.log_level, "debug");
        assert_eq!(args.log_level_filter(), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_unknown_log_level() {
        let args = Args::parse_from(["vertree", "history.toml", "--log-level", "loud"]);
        assert_eq!(args.log_level_filter(), None);
    }
}
