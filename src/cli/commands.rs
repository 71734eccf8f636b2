//! CLI command implementations
//!
//! Commands follow a strict boot sequence: load config, open the store,
//! then (for `start`) hand everything to the HTTP server.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::EntryStore;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure. Every field has a default, so a
/// missing config file is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment name reported by the health endpoint
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/time_tracking.db")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from file if present, defaults otherwise. Environment
    /// variables override either source.
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// PORT, DB_PATH and ENVIRONMENT override the file values.
    fn apply_env_overrides(&mut self) -> CliResult<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.port = port.parse().map_err(|_| {
                CliError::config_error(format!("PORT must be an integer, got '{}'", port))
            })?;
        }
        if let Ok(db_path) = std::env::var("DB_PATH") {
            self.db_path = PathBuf::from(db_path);
        }
        if let Ok(environment) = std::env::var("ENVIRONMENT") {
            self.environment = environment;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.host.is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }
        if self.port == 0 {
            return Err(CliError::config_error("port must be non-zero"));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(CliError::config_error("db_path must not be empty"));
        }
        Ok(())
    }

    fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Dispatch a parsed command.
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config).await,
        Command::Start { config } => start(&config).await,
    }
}

/// Create the database file and schema, then exit.
pub async fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let store = EntryStore::open(&config.db_path).await?;
    store.close().await;
    println!("Database initialized at {}", config.db_path.display());
    Ok(())
}

/// Boot the store and serve HTTP until a shutdown signal arrives.
pub async fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let store = EntryStore::open(&config.db_path).await?;

    info!(environment = %config.environment, "starting timetrack");
    let server = HttpServer::new(
        config.http_config(),
        store.clone(),
        config.environment.clone(),
    );
    server.start().await?;

    store.close().await;
    Ok(())
}
