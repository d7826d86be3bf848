//! Entry point of the `krushi-site` command.

use std::process::ExitCode;

use clap::Parser;
use krushi_site::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Parses the command line and runs it with logging to stderr.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
