//! CLI module
//!
//! Provides the command-line interface:
//! - init: create the database file and schema
//! - start: boot the store and serve the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run_command, Config};
pub use errors::{CliError, CliResult};

use tracing_subscriber::EnvFilter;

/// Parse arguments, initialize logging, dispatch.
pub async fn run() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse_args();
    run_command(cli.command).await
}
