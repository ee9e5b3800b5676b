//! Grocery Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Every section is optional; an empty file is a valid config.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use grocery_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[dashboard]\ntop_n = 3").unwrap();
//! assert_eq!(config.dashboard.top_n, 3);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [database]
//! path = "data/grocery.db"
//! max_connections = 4
//!
//! [log]
//! level = "info"
//!
//! [dashboard]
//! top_n = 5
//! ```

mod dashboard;
mod database;
mod error;
mod logging;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use dashboard::DashboardConfig;
pub use database::{DEFAULT_DATABASE_PATH, DatabaseConfig};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database location and pool size
    pub database: DatabaseConfig,

    /// Logging configuration
    pub log: LogConfig,

    /// Dashboard settings
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid_value(
                "database",
                "max_connections",
                "must be at least 1",
            ));
        }

        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value(
                "database",
                "path",
                "must not be empty",
            ));
        }

        if self.dashboard.top_n == 0 {
            return Err(ConfigError::invalid_value(
                "dashboard",
                "top_n",
                "must be at least 1",
            ));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
