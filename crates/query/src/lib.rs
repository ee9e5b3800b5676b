//! Grocery Query - read-only SQL execution for sales analytics
//!
//! Provides the query executor the analytics engine runs against:
//! - **QueryBackend**: async trait, one parameterized statement per call
//! - **SqliteBackend**: `sqlx` SQLite pool implementation
//! - **QueryResult**: backend-agnostic rows, decodable into typed records
//!
//! # Usage
//!
//! ```ignore
//! use grocery_query::{QueryConfig, QueryEngine, QueryParam};
//!
//! let engine = QueryEngine::from_config(&QueryConfig::sqlite("data/grocery.db")).await?;
//! let result = engine
//!     .query("SELECT COUNT(*) AS total FROM sales WHERE quantity > ?", &[QueryParam::Int(1)])
//!     .await?;
//! println!("Rows: {}", result.row_count);
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod param;
pub mod result;

// Re-exports
pub use backend::QueryBackend;
pub use backend::sqlite::SqliteBackend;
pub use config::QueryConfig;
pub use error::QueryError;
pub use param::{DATE_FORMAT, DATETIME_FORMAT, QueryParam};
pub use result::{Column, DataType, QueryResult, TableInfo};

use std::sync::Arc;

/// Query engine that routes queries to the configured backend
#[derive(Clone)]
pub struct QueryEngine {
    backend: Arc<dyn QueryBackend>,
}

impl QueryEngine {
    /// Create a new query engine with a specific backend
    pub fn new(backend: impl QueryBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a query engine from config
    pub async fn from_config(config: &QueryConfig) -> Result<Self, QueryError> {
        let path = config.require_path()?;
        let backend =
            SqliteBackend::connect(path, config.max_connections, config.read_only).await?;
        Ok(Self::new(backend))
    }

    /// Execute a SQL query
    pub async fn query(&self, sql: &str, params: &[QueryParam]) -> Result<QueryResult, QueryError> {
        self.backend.execute(sql, params).await
    }

    /// Check if the backend is healthy
    pub async fn health_check(&self) -> Result<(), QueryError> {
        self.backend.health_check().await
    }

    /// List available tables
    pub async fn list_tables(&self) -> Result<Vec<TableInfo>, QueryError> {
        self.backend.list_tables().await
    }

    /// Get the backend name
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

/// Output format for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON array of objects
    Json,
    /// CSV format
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

// QueryEngine is itself a backend so it can be handed to the metrics engine
#[async_trait::async_trait]
impl QueryBackend for QueryEngine {
    async fn execute(&self, sql: &str, params: &[QueryParam]) -> Result<QueryResult, QueryError> {
        self.backend.execute(sql, params).await
    }

    async fn health_check(&self) -> Result<(), QueryError> {
        self.backend.health_check().await
    }

    fn name(&self) -> &'static str {
        self.backend.name()
    }

    async fn list_tables(&self) -> Result<Vec<TableInfo>, QueryError> {
        self.backend.list_tables().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[tokio::test]
    async fn test_from_config_requires_path() {
        let result = QueryEngine::from_config(&QueryConfig::default()).await;
        assert!(matches!(result, Err(QueryError::Config(_))));
    }
}
