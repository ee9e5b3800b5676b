//! Database configuration

use std::path::PathBuf;

use serde::Deserialize;

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "data/grocery.db";

/// Database configuration
///
/// # Example
///
/// ```toml
/// [database]
/// path = "data/grocery.db"
/// max_connections = 4
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    /// Default: data/grocery.db
    pub path: PathBuf,

    /// Maximum pooled connections (at least 1)
    /// Default: 4
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, PathBuf::from("data/grocery.db"));
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: DatabaseConfig = toml::from_str("path = \"/tmp/sales.db\"").unwrap();
        assert_eq!(config.path, PathBuf::from("/tmp/sales.db"));
        assert_eq!(config.max_connections, 4);
    }
}
