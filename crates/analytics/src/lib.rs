//! Grocery Analytics Engine
//!
//! Sales reports over the grocery dataset, built on top of `grocery-query`.
//!
//! # Overview
//!
//! - **Filters**: optional date range and row limit, trend periods
//! - **Query Builder**: parameterized SQL generation for SQLite
//! - **Reports**: employees, geography, products, customers, trends, discounts
//! - **Dashboard**: overall totals plus top products, employees and countries
//! - **Segments**: spend, frequency and discount classifications
//!
//! # Usage
//!
//! ```ignore
//! use grocery_analytics::{Filter, MetricsEngine, TimeRange};
//!
//! let engine = MetricsEngine::new(Box::new(backend));
//!
//! let filter = Filter::all_time().with_time_range(TimeRange::parse("30d")?);
//! let employees = engine.employee_performance(&filter).await;
//! let monthly = engine.sales_trends("monthly", &filter).await?;
//! let dashboard = engine.dashboard().await;
//! ```
//!
//! # Failure policy
//!
//! Report methods log data-access failures and return no rows. The matching
//! `try_*` methods return the error instead. The dashboard is all-or-nothing.

pub mod builder;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod filter;
pub mod reports;
pub mod segments;
pub mod timerange;

#[cfg(test)]
mod filter_test;
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod timerange_test;

// Re-exports for convenience
pub use builder::{BuiltQuery, QueryBuilder};
pub use dashboard::{DEFAULT_TOP_N, DashboardSnapshot, GeneralMetrics, RevenueEntry};
pub use engine::MetricsEngine;
pub use error::{AnalyticsError, Result};
pub use filter::{Filter, MAX_LIMIT, Period};
pub use reports::{
    CustomerProfile, CustomerSegmentationReport, DiscountEffectiveness,
    DiscountEffectivenessReport, EmployeePerformance, EmployeePerformanceReport, GeographicSales,
    GeographicSalesReport, ProductPerformance, ProductPerformanceReport, Report, SalesTrend,
    SalesTrendReport,
};
pub use segments::{CustomerSegment, DiscountRange, PurchaseFrequency};
pub use timerange::TimeRange;
