//! Query configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Query configuration
///
/// Points the executor at a SQLite database file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Path to the database file
    pub path: Option<PathBuf>,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// Open the database read-only
    pub read_only: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: default_max_connections(),
            read_only: false,
        }
    }
}

fn default_max_connections() -> u32 {
    4
}

impl QueryConfig {
    /// Create config for a database file
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Open the database read-only
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the pool size
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Get the configured path or fail with a config error
    pub fn require_path(&self) -> Result<&PathBuf, QueryError> {
        self.path.as_ref().ok_or_else(|| {
            QueryError::Config(
                "no database configured. Set [database] path = \"data/grocery.db\" \
                 in the config file or pass --database"
                    .to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_path() {
        let config = QueryConfig::default();
        assert!(config.path.is_none());
        assert_eq!(config.max_connections, 4);
        assert!(matches!(config.require_path(), Err(QueryError::Config(_))));
    }

    #[test]
    fn test_sqlite_builder() {
        let config = QueryConfig::sqlite("data/grocery.db")
            .with_read_only(true)
            .with_max_connections(2);
        assert_eq!(config.require_path().unwrap(), &PathBuf::from("data/grocery.db"));
        assert!(config.read_only);
        assert_eq!(config.max_connections, 2);
    }
}
