//! Sales reports
//!
//! Each report is one grouped aggregation over the sales facts:
//!
//! - **employees**: performance and revenue rank per sales person
//! - **geography**: sales per (country, city)
//! - **products**: performance per product, including unsold ones
//! - **customers**: spend, recency and segment per customer
//! - **trends**: sales per day or month
//! - **discounts**: sales per discount bucket

pub mod customers;
pub mod discounts;
pub mod employees;
pub mod geography;
pub mod products;
pub mod trends;

pub use customers::{CustomerProfile, CustomerSegmentationReport};
pub use discounts::{DiscountEffectiveness, DiscountEffectivenessReport};
pub use employees::{EmployeePerformance, EmployeePerformanceReport};
pub use geography::{GeographicSales, GeographicSalesReport};
pub use products::{ProductPerformance, ProductPerformanceReport};
pub use trends::{SalesTrend, SalesTrendReport};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::builder::BuiltQuery;
use crate::error::Result;
use grocery_query::QueryBackend;

/// A report that can be executed against a query backend
#[async_trait]
pub trait Report: Send + Sync {
    /// One output row
    type Record: DeserializeOwned + Send;

    /// Get the report name for logging/identification
    fn name(&self) -> &'static str;

    /// The single query this report issues
    fn build_query(&self) -> BuiltQuery;

    /// Post-process decoded rows (classification, derived fields)
    fn finish(&self, records: Vec<Self::Record>) -> Vec<Self::Record> {
        records
    }

    /// Execute this report and return its rows in report order
    async fn execute(&self, backend: &dyn QueryBackend) -> Result<Vec<Self::Record>> {
        let query = self.build_query();
        let result = backend.execute(&query.sql, &query.params).await?;

        debug!(
            report = self.name(),
            rows = result.row_count,
            time_ms = result.execution_time_ms,
            "report executed"
        );

        let records = result.deserialize_rows()?;
        Ok(self.finish(records))
    }
}
