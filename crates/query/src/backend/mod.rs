//! Query backend trait and implementations

pub mod sqlite;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::param::QueryParam;
use crate::result::{QueryResult, TableInfo};

/// Query backend trait
///
/// A backend executes one read-only statement per call and returns the full
/// result set. There are no retries: a failed attempt is returned as is.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Execute a SQL query with positional `?` parameters
    async fn execute(&self, sql: &str, params: &[QueryParam]) -> Result<QueryResult, QueryError>;

    /// Check if backend is available
    async fn health_check(&self) -> Result<(), QueryError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// List available tables
    async fn list_tables(&self) -> Result<Vec<TableInfo>, QueryError>;
}

/// Validate SQL query - only allow SELECT and WITH (CTE) queries
///
/// Reports never write. This guardrail keeps a mistyped or malformed
/// statement from reaching the store as a write.
pub fn validate_sql(sql: &str) -> Result<(), QueryError> {
    let trimmed = sql.trim();
    let upper = trimmed.to_uppercase();

    if !upper.starts_with("SELECT") && !upper.starts_with("WITH") {
        return Err(QueryError::InvalidSql(
            "only SELECT and WITH queries are allowed".to_string(),
        ));
    }

    // Block SELECT ... INTO
    if upper.contains(" INTO ") {
        return Err(QueryError::InvalidSql(
            "SELECT INTO is not allowed".to_string(),
        ));
    }

    // Allow a trailing semicolon, nothing after it
    if trimmed.trim_end_matches(';').contains(';') {
        return Err(QueryError::InvalidSql(
            "multiple statements not allowed".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sql_select() {
        assert!(validate_sql("SELECT * FROM sales").is_ok());
        assert!(validate_sql("  SELECT count(*) FROM customers  ").is_ok());
        assert!(validate_sql("select * from sales").is_ok());
    }

    #[test]
    fn test_validate_sql_with() {
        assert!(validate_sql("WITH totals AS (SELECT 1) SELECT * FROM totals").is_ok());
    }

    #[test]
    fn test_validate_sql_rejects_writes() {
        assert!(validate_sql("INSERT INTO sales VALUES (1)").is_err());
        assert!(validate_sql("DELETE FROM sales").is_err());
        assert!(validate_sql("DROP TABLE sales").is_err());
        assert!(validate_sql("UPDATE products SET price = 1").is_err());
        assert!(validate_sql("CREATE TABLE foo (id INT)").is_err());
    }

    #[test]
    fn test_validate_sql_multiple_statements() {
        assert!(validate_sql("SELECT 1; DROP TABLE sales").is_err());
        assert!(validate_sql("SELECT 1; SELECT 2").is_err());
        assert!(validate_sql("SELECT * FROM sales;").is_ok());
    }

    #[test]
    fn test_validate_sql_select_into_blocked() {
        assert!(validate_sql("SELECT * INTO backup FROM sales").is_err());
    }

    #[test]
    fn test_validate_sql_subqueries_ok() {
        assert!(
            validate_sql("SELECT * FROM sales WHERE customer_id IN (SELECT customer_id FROM customers)")
                .is_ok()
        );
    }
}
