//! vertree CLI entry point.

use std::process;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use vertree_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    // Unknown levels fall back to warnings only
    let log_level = args.log_level_filter().unwrap_or_else(|| {
        eprintln!(
            "vertree: unknown --log-level '{}', expected off, error, warn, info, debug or trace; logging warnings only",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?, input = args.input; "Starting vertree layout");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = vertree_cli::run(&args) {
        // History errors point into the input file; everything else is one line
        let reporter = miette::GraphicalReportHandler::new();

        for reportable in to_reportables(&err) {
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &reportable)
                .expect("Writing to String buffer is infallible");

            error!("{writer}");
        }

        process::exit(1);
    }

    info!(output = args.output; "Version tree written");
}
