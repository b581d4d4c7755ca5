//! Binary crate for the `weather-agent` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The process-boundary error policy: specific failures are logged, the
//!   user sees a single generic line and a non-zero exit

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();

    if let Err(err) = cmd.run().await {
        tracing::error!(error = %err, "request failed");
        eprintln!("I encountered an issue processing your request. Please try again.");
        std::process::exit(1);
    }
}
