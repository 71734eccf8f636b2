//! CLI argument definitions using clap
//!
//! Commands:
//! - timetrack init --config <path>
//! - timetrack start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// timetrack - a small self-hosted time tracking API
#[derive(Parser, Debug)]
#[command(name = "timetrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and schema, then exit
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./timetrack.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./timetrack.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
