//! vue-jsx-rs: Lowers Vue JSX syntax trees to createVNode calls.

mod cli;
mod config;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::Result;
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `VUE_JSX_LOG=debug`.
const LOG_ENV: &str = "VUE_JSX_LOG";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let summary = orchestrator::run(args)?;
    if summary.error_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}
