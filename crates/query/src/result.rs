//! Query result types
//!
//! Unified result format returned by every backend. Rows are kept as JSON
//! scalars so callers can decode them into typed records with serde.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Unified query result across all backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column definitions, in select order
    pub columns: Vec<Column>,

    /// Row data as JSON values (backend-agnostic)
    pub rows: Vec<Vec<serde_json::Value>>,

    /// Total row count
    pub row_count: usize,

    /// Query execution time in milliseconds
    pub execution_time_ms: u64,
}

impl QueryResult {
    /// Create a new query result
    pub fn new(
        columns: Vec<Column>,
        rows: Vec<Vec<serde_json::Value>>,
        execution_time_ms: u64,
    ) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
            execution_time_ms,
        }
    }

    /// Create an empty result
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), 0)
    }

    /// Check if result is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a single row as a column-name keyed JSON object
    pub fn row_object(&self, idx: usize) -> Option<serde_json::Map<String, serde_json::Value>> {
        let row = self.rows.get(idx)?;
        Some(
            self.columns
                .iter()
                .zip(row.iter())
                .map(|(column, value)| (column.name.clone(), value.clone()))
                .collect(),
        )
    }

    /// Decode every row into a typed record
    ///
    /// Each row is turned into an object keyed by column name, so record
    /// fields are matched by name rather than position.
    pub fn deserialize_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>, QueryError> {
        (0..self.rows.len())
            .map(|idx| {
                let object = self.row_object(idx).unwrap_or_default();
                serde_json::from_value(serde_json::Value::Object(object))
                    .map_err(|e| QueryError::Decode(format!("row {}: {}", idx, e)))
            })
            .collect()
    }
}

/// Column definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Data type
    pub data_type: DataType,

    /// Whether the column is nullable
    pub nullable: bool,
}

impl Column {
    /// Create a new column definition
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

/// Data types supported in query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Signed 64-bit integer
    Int64,
    /// 64-bit floating point
    Float64,
    /// UTF-8 string (dates and timestamps included)
    String,
    /// Binary data
    Binary,
    /// Boolean
    Boolean,
    /// Unknown/other type, or a column that only held NULLs
    Unknown,
}

impl DataType {
    /// Convert from a SQLite storage class or declared type name
    pub fn from_sqlite(type_name: &str) -> Self {
        match type_name.to_uppercase().as_str() {
            "INTEGER" | "INT" | "BIGINT" | "INT8" => DataType::Int64,
            "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => DataType::Float64,
            "TEXT" | "DATE" | "TIME" | "DATETIME" => DataType::String,
            "BLOB" => DataType::Binary,
            "BOOLEAN" => DataType::Boolean,
            _ => DataType::Unknown,
        }
    }
}

/// Table information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    /// Table name
    pub name: String,

    /// Row count (if available)
    pub row_count: Option<u64>,

    /// Column definitions
    pub columns: Vec<Column>,
}

impl TableInfo {
    /// Create new table info with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            row_count: None,
            columns: Vec::new(),
        }
    }

    /// Add columns to table info
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        name: String,
        revenue: f64,
        rank: Option<i64>,
    }

    fn sample() -> QueryResult {
        QueryResult::new(
            vec![
                Column::new("name", DataType::String, false),
                Column::new("revenue", DataType::Float64, true),
                Column::new("rank", DataType::Int64, true),
            ],
            vec![
                vec![json!("Apples"), json!(120.5), json!(1)],
                vec![json!("Pears"), json!(80), serde_json::Value::Null],
            ],
            3,
        )
    }

    #[test]
    fn test_deserialize_rows_by_column_name() {
        let rows: Vec<Row> = sample().deserialize_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Apples");
        assert_eq!(rows[0].rank, Some(1));
        // Integer JSON values decode into float fields
        assert_eq!(rows[1].revenue, 80.0);
        assert_eq!(rows[1].rank, None);
    }

    #[test]
    fn test_deserialize_rows_reports_bad_row() {
        let mut result = sample();
        result.rows[1][0] = json!(42);
        let err = result.deserialize_rows::<Row>().unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_empty_result() {
        let result = QueryResult::empty();
        assert!(result.is_empty());
        assert!(result.deserialize_rows::<Row>().unwrap().is_empty());
    }

    #[test]
    fn test_data_type_from_sqlite() {
        assert_eq!(DataType::from_sqlite("INTEGER"), DataType::Int64);
        assert_eq!(DataType::from_sqlite("real"), DataType::Float64);
        assert_eq!(DataType::from_sqlite("TEXT"), DataType::String);
        assert_eq!(DataType::from_sqlite("NULL"), DataType::Unknown);
    }
}
