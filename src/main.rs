//! DocFlow: engineering document workflow CLI
//!
//! Loads configuration, initializes logging, and dispatches the command
//! against the JSON snapshot store.

mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use docflow_core::config::AppConfig;

use crate::commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Starting DocFlow");

    if let Err(e) = cli.execute(config).await {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
///
/// Logs go to stderr so that `--format json` output on stdout stays parseable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
