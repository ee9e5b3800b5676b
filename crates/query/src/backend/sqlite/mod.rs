//! SQLite backend
//!
//! Executes report queries against a SQLite database through an `sqlx`
//! connection pool. The pool is the session handle: callers create it once
//! and pass it in, there is no process-wide connection.

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Row, TypeInfo, ValueRef};

use crate::backend::{QueryBackend, validate_sql};
use crate::error::QueryError;
use crate::param::QueryParam;
use crate::result::{Column, DataType, QueryResult, TableInfo};

/// SQLite backend for report queries
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool on a database file
    ///
    /// With `read_only` set the connection is opened with `SQLITE_OPEN_READONLY`
    /// and the file must already exist.
    pub async fn connect(
        path: impl AsRef<Path>,
        max_connections: u32,
        read_only: bool,
    ) -> Result<Self, QueryError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(read_only)
            .create_if_missing(!read_only)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| {
                QueryError::Connection(format!("failed to open {}: {}", path.display(), e))
            })?;

        tracing::debug!(path = %path.display(), read_only, "opened sqlite pool");
        Ok(Self::new(pool))
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<Column>, QueryError> {
        let rows = sqlx::query("SELECT name, type, \"notnull\" FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let name: String = row.try_get("name")?;
                let declared: String = row.try_get("type")?;
                let not_null: i64 = row.try_get("notnull")?;
                Ok(Column::new(
                    name,
                    DataType::from_sqlite(&declared),
                    not_null == 0,
                ))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(QueryError::from)
    }
}

#[async_trait]
impl QueryBackend for SqliteBackend {
    async fn execute(&self, sql: &str, params: &[QueryParam]) -> Result<QueryResult, QueryError> {
        validate_sql(sql)?;

        let start = Instant::now();

        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, param| bind_param(query, param));

        let rows = query.fetch_all(&self.pool).await?;

        let execution_time_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            rows = rows.len(),
            params = params.len(),
            time_ms = execution_time_ms,
            "query executed"
        );

        rows_to_result(&rows, execution_time_ms)
    }

    async fn health_check(&self) -> Result<(), QueryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| QueryError::Connection(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn list_tables(&self) -> Result<Vec<TableInfo>, QueryError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let columns = self.table_columns(&name).await?;
            let count_sql = format!("SELECT COUNT(*) FROM \"{}\"", name.replace('"', "\"\""));
            let row_count: i64 = sqlx::query_scalar(&count_sql)
                .fetch_one(&self.pool)
                .await?;

            tables.push(TableInfo {
                name,
                row_count: Some(row_count.max(0) as u64),
                columns,
            });
        }

        Ok(tables)
    }
}

fn bind_param<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    param: &QueryParam,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match param {
        QueryParam::Null => query.bind(None::<i64>),
        QueryParam::Int(v) => query.bind(*v),
        QueryParam::Float(v) => query.bind(*v),
        QueryParam::Text(v) => query.bind(v.clone()),
    }
}

/// Convert fetched rows into a QueryResult
fn rows_to_result(rows: &[SqliteRow], execution_time_ms: u64) -> Result<QueryResult, QueryError> {
    let Some(first) = rows.first() else {
        return Ok(QueryResult::new(Vec::new(), Vec::new(), execution_time_ms));
    };

    let names: Vec<String> = first
        .columns()
        .iter()
        .map(|c| sqlx::Column::name(c).to_string())
        .collect();

    let data: Vec<Vec<serde_json::Value>> = rows
        .iter()
        .map(row_to_json)
        .collect::<Result<_, _>>()?;

    // SQLite is dynamically typed; infer column types from the values seen
    let columns = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let data_type = data
                .iter()
                .filter_map(|row| row.get(idx))
                .find(|v| !v.is_null())
                .map(json_data_type)
                .unwrap_or(DataType::Unknown);
            let nullable = data.iter().any(|row| row.get(idx).is_none_or(|v| v.is_null()));
            Column::new(name, data_type, nullable)
        })
        .collect();

    Ok(QueryResult::new(columns, data, execution_time_ms))
}

/// Convert one row to JSON values, dispatching on each value's storage class
fn row_to_json(row: &SqliteRow) -> Result<Vec<serde_json::Value>, QueryError> {
    let mut values = Vec::with_capacity(row.len());

    for idx in 0..row.len() {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            values.push(serde_json::Value::Null);
            continue;
        }

        let storage = raw.type_info().name().to_string();
        let value = match DataType::from_sqlite(&storage) {
            DataType::Int64 | DataType::Boolean => {
                serde_json::Value::from(row.try_get_unchecked::<i64, _>(idx)?)
            }
            DataType::Float64 => {
                let val = row.try_get_unchecked::<f64, _>(idx)?;
                serde_json::Number::from_f64(val)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
            DataType::Binary => {
                let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            }
            DataType::String | DataType::Unknown => {
                serde_json::Value::String(row.try_get_unchecked::<String, _>(idx)?)
            }
        };
        values.push(value);
    }

    Ok(values)
}

fn json_data_type(value: &serde_json::Value) -> DataType {
    match value {
        serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => DataType::Int64,
        serde_json::Value::Number(_) => DataType::Float64,
        serde_json::Value::Bool(_) => DataType::Boolean,
        serde_json::Value::String(_) => DataType::String,
        _ => DataType::Unknown,
    }
}
