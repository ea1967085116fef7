mod adapters;
mod cli;
mod config;
mod core;
mod error;
mod logging;
mod render;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level);

    match adapters::tbl::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            eprintln!("sqlite-tbl: {e}");
            ExitCode::FAILURE
        }
    }
}
