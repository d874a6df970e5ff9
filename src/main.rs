//! Runs the trait-object pass and then the hand-built vtable pass.

use std::process::ExitCode;

use rootcause::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use vtable_bench::{BenchConfig, driver};

fn init_tracing() {
    // Default to WARN so that stdout and stderr stay quiet unless asked.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), Report> {
    let config = BenchConfig::from_env().context("Failed to read the benchmark configuration")?;
    driver::run(&config);
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report}");
            ExitCode::FAILURE
        }
    }
}
