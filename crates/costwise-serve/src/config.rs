//! Server configuration from TOML or environment

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Default host address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port number
pub const DEFAULT_PORT: u16 = 8000;

/// Default database path
pub const DEFAULT_DB_PATH: &str = "costwise.db";

/// Default CORS origins (dashboard dev servers)
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`ServerConfig`]
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Allowed CORS origins
    pub cors_origins: Vec<String>,

    /// Path to SQLite database
    pub db_path: String,

    /// Load demonstration resources into an empty database at startup
    pub seed_demo_data: bool,

    /// Log level for tracing
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            db_path: DEFAULT_DB_PATH.to_string(),
            seed_demo_data: true,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration: defaults, then the optional TOML file, then
    /// environment overrides.
    ///
    /// Not validated here; callers layer command-line flags on top and call
    /// [`ServerConfig::validate`] once the final values are known.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a TOML file; missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse TOML text; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `COSTWISE_*` environment variables on top of this config
    ///
    /// Environment variables:
    /// - `COSTWISE_HOST` - Server host
    /// - `COSTWISE_PORT` - Server port
    /// - `COSTWISE_DB_PATH` - Database path
    /// - `COSTWISE_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
    /// - `COSTWISE_SEED` - Seed demo data into an empty database (true/false)
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("COSTWISE_HOST") {
            self.host = host;
        }

        if let Some(port_str) = lookup("COSTWISE_PORT") {
            match port_str.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => warn!("Invalid COSTWISE_PORT value '{}': {}", port_str, e),
            }
        }

        if let Some(db_path) = lookup("COSTWISE_DB_PATH") {
            self.db_path = db_path;
        }

        if let Some(log_level) = lookup("COSTWISE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(seed) = lookup("COSTWISE_SEED") {
            match seed.parse::<bool>() {
                Ok(seed) => self.seed_demo_data = seed,
                Err(e) => warn!("Invalid COSTWISE_SEED value '{}': {}", seed, e),
            }
        }
    }

    /// Get the socket address for the server
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("Invalid address: {}", e)))
    }

    /// Get the full server URL
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("Port cannot be zero".to_string()));
        }

        if self.host.is_empty() {
            return Err(ConfigError::Invalid("Host cannot be empty".to_string()));
        }

        if self.db_path.is_empty() {
            return Err(ConfigError::Invalid("Database path cannot be empty".to_string()));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                )));
            }
        }

        Ok(())
    }
}
