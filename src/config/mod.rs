//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file with environment-variable
//! overrides layered on top:
//!
//! - `BIZTIME_CONFIG`: path to the YAML file (skipped when unset)
//! - `BIZTIME_ADDR`: overrides the bind address
//! - `DATABASE_URL`: overrides the database connection URL

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "127.0.0.1:3000"
    #[serde(default = "default_addr")]
    pub addr: String,
}

/// Datastore configuration (used by the `postgres` backend)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL for the PostgreSQL endpoint
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_database_url() -> String {
    "postgres://localhost:5432/biztime".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("failed to parse config")?;
        Ok(config)
    }

    /// Load configuration for the running process: the file named by
    /// `BIZTIME_CONFIG` (defaults when unset), then env overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("BIZTIME_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("BIZTIME_ADDR") {
            config.server.addr = addr;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }
}
