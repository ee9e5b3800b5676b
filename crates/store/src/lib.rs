//! Grocery Store - relational schema and entity repositories
//!
//! Owns the SQLite schema for the sales dataset and the per-entity
//! repositories used to load it:
//!
//! - **Dimensions**: countries, cities, categories, customers, employees, products
//! - **Facts**: sales (insert-only)
//!
//! Every repository function takes the pool explicitly. `save` accepts any
//! executor, so a batch of writes can share one transaction:
//!
//! ```ignore
//! let db = Database::open("data/grocery.db").await?;
//! let mut peru = Country::new("Peru", "pe")?;
//! country::save(db.pool(), &mut peru).await?;
//!
//! let mut tx = db.pool().begin().await?;
//! let mut lima = City::new("Lima", "15001", peru.id().unwrap_or_default())?;
//! city::save(&mut *tx, &mut lima).await?;
//! tx.commit().await?;
//! ```

pub mod category;
pub mod city;
pub mod country;
pub mod customer;
pub mod employee;
pub mod error;
pub mod product;
pub mod sale;
mod schema;
pub mod seed;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

pub use category::Category;
pub use city::City;
pub use country::Country;
pub use customer::Customer;
pub use employee::{Employee, Gender};
pub use error::{Result, StoreError};
pub use product::{Product, ProductClass};
pub use sale::{Sale, SalesSummary};

/// Handle to the sales database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open or create a database at the given path
    ///
    /// Creates parent directories and the schema if they don't exist.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Open {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Open {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let db = Self { pool };
        db.init_schema().await?;

        info!("database opened at {}", path.display());
        Ok(db)
    }

    /// Create an in-memory database
    ///
    /// Uses a single long-lived connection, since every SQLite memory
    /// connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = "sqlite::memory:"
            .parse::<SqliteConnectOptions>()?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if missing
    pub async fn init_schema(&self) -> Result<()> {
        for (table, ddl) in schema::TABLES {
            sqlx::query(ddl).execute(&self.pool).await?;
            debug!(table = table, "table ready");
        }

        for ddl in schema::INDEXES {
            sqlx::query(ddl).execute(&self.pool).await?;
        }

        debug!("schema initialized");
        Ok(())
    }

    /// Close the pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/grocery.db");

        let db = Database::open(&path).await.unwrap();
        assert!(path.exists());

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        assert_eq!(
            tables,
            vec!["categories", "cities", "countries", "customers", "employees", "products", "sales"]
        );
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        db.init_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = Database::in_memory().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO cities (city_name, zipcode, country_id) VALUES ('Nowhere', '0000', 99)",
        )
        .execute(db.pool())
        .await;
        assert!(result.is_err());
    }
}
