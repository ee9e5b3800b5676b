//! Metrics engine
//!
//! Runs reports against a query backend and applies the failure policy:
//!
//! - `try_*` methods return every error to the caller.
//! - The plain methods log data-access failures and return no rows, so a
//!   presentation loop never stops on a broken report.
//! - Invalid arguments (an unknown trend period) always reach the caller.

use std::future::Future;

use chrono::{Local, NaiveDate};
use tracing::{error, info};

use crate::dashboard::{
    DEFAULT_TOP_N, DashboardSnapshot, GeneralMetricsQuery, RevenueLeaderboard,
};
use crate::error::{AnalyticsError, Result};
use crate::filter::{Filter, Period};
use crate::reports::{
    CustomerProfile, CustomerSegmentationReport, DiscountEffectiveness,
    DiscountEffectivenessReport, EmployeePerformance, EmployeePerformanceReport, GeographicSales,
    GeographicSalesReport, ProductPerformance, ProductPerformanceReport, Report, SalesTrend,
    SalesTrendReport,
};
use grocery_query::QueryBackend;

/// Metrics engine for executing sales reports
pub struct MetricsEngine {
    backend: Box<dyn QueryBackend>,
    top_n: u32,
    as_of: Option<NaiveDate>,
}

impl MetricsEngine {
    /// Create a new metrics engine with a backend
    pub fn new(backend: Box<dyn QueryBackend>) -> Self {
        Self {
            backend,
            top_n: DEFAULT_TOP_N,
            as_of: None,
        }
    }

    /// Set the size of the dashboard top lists (at least 1)
    pub fn with_top_n(mut self, top_n: u32) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    /// Fix the date customer recency is measured against (default: today)
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Get a reference to the underlying query backend
    pub fn backend(&self) -> &dyn QueryBackend {
        self.backend.as_ref()
    }

    /// Get the backend name
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Execute a report
    pub async fn execute<R: Report>(&self, report: &R) -> Result<Vec<R::Record>> {
        report.execute(self.backend.as_ref()).await
    }

    // Employee performance

    /// Employee performance, propagating data-access errors
    pub async fn try_employee_performance(
        &self,
        filter: &Filter,
    ) -> Result<Vec<EmployeePerformance>> {
        self.execute(&EmployeePerformanceReport::new(*filter)).await
    }

    /// Employee performance; no rows on data-access failure
    pub async fn employee_performance(&self, filter: &Filter) -> Vec<EmployeePerformance> {
        or_empty(
            "employee_performance",
            self.try_employee_performance(filter).await,
        )
    }

    // Geography

    /// Sales per country and city, propagating data-access errors
    pub async fn try_geographic_sales(&self, filter: &Filter) -> Result<Vec<GeographicSales>> {
        self.execute(&GeographicSalesReport::new(*filter)).await
    }

    /// Sales per country and city; no rows on data-access failure
    pub async fn geographic_sales(&self, filter: &Filter) -> Vec<GeographicSales> {
        or_empty("geographic_sales", self.try_geographic_sales(filter).await)
    }

    // Products

    /// Product performance, propagating data-access errors
    pub async fn try_product_performance(
        &self,
        filter: &Filter,
    ) -> Result<Vec<ProductPerformance>> {
        self.execute(&ProductPerformanceReport::new(*filter)).await
    }

    /// Product performance; no rows on data-access failure
    pub async fn product_performance(&self, filter: &Filter) -> Vec<ProductPerformance> {
        or_empty(
            "product_performance",
            self.try_product_performance(filter).await,
        )
    }

    // Customers

    /// Customer segmentation, propagating data-access errors
    pub async fn try_customer_segmentation(
        &self,
        filter: &Filter,
    ) -> Result<Vec<CustomerProfile>> {
        let as_of = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        self.execute(&CustomerSegmentationReport::new(*filter, as_of)).await
    }

    /// Customer segmentation; no rows on data-access failure
    pub async fn customer_segmentation(&self, filter: &Filter) -> Vec<CustomerProfile> {
        or_empty(
            "customer_segmentation",
            self.try_customer_segmentation(filter).await,
        )
    }

    // Trends

    /// Sales per period, propagating data-access errors
    pub async fn try_sales_trends(&self, period: Period, filter: &Filter) -> Result<Vec<SalesTrend>> {
        self.execute(&SalesTrendReport::new(period, *filter)).await
    }

    /// Sales per `daily` or `monthly` period
    ///
    /// Any other period is an `InvalidArgument` error. Data-access failures
    /// return no rows.
    pub async fn sales_trends(&self, period: &str, filter: &Filter) -> Result<Vec<SalesTrend>> {
        let period = Period::parse(period)?;
        Ok(or_empty(
            "sales_trends",
            self.try_sales_trends(period, filter).await,
        ))
    }

    // Discounts

    /// Discount effectiveness, propagating data-access errors
    pub async fn try_discount_effectiveness(
        &self,
        filter: &Filter,
    ) -> Result<Vec<DiscountEffectiveness>> {
        self.execute(&DiscountEffectivenessReport::new(*filter)).await
    }

    /// Discount effectiveness; no rows on data-access failure
    pub async fn discount_effectiveness(&self, filter: &Filter) -> Vec<DiscountEffectiveness> {
        or_empty(
            "discount_effectiveness",
            self.try_discount_effectiveness(filter).await,
        )
    }

    // Dashboard

    /// Compose the dashboard, failing if any section fails
    pub async fn try_dashboard(&self) -> Result<DashboardSnapshot> {
        let backend = self.backend.as_ref();
        let general = GeneralMetricsQuery;
        let top_products = RevenueLeaderboard::top_products(self.top_n);
        let top_employees = RevenueLeaderboard::top_employees(self.top_n);
        let by_country = RevenueLeaderboard::sales_by_country();

        let (general, top_products, top_employees, sales_by_country) = tokio::try_join!(
            section("general_metrics", general.execute(backend)),
            section("top_products", top_products.execute(backend)),
            section("top_employees", top_employees.execute(backend)),
            section("sales_by_country", by_country.execute(backend)),
        )?;

        Ok(DashboardSnapshot {
            general_metrics: general.into_iter().next().unwrap_or_default(),
            top_products,
            top_employees,
            sales_by_country,
        })
    }

    /// Compose the dashboard; an empty snapshot if any section fails
    pub async fn dashboard(&self) -> DashboardSnapshot {
        match self.try_dashboard().await {
            Ok(snapshot) => {
                info!(
                    total_sales = snapshot.general_metrics.total_sales,
                    countries = snapshot.sales_by_country.len(),
                    "dashboard composed"
                );
                snapshot
            }
            Err(e) => {
                error!(report = "dashboard", error = %e, "dashboard failed, returning empty snapshot");
                DashboardSnapshot::empty()
            }
        }
    }
}

/// Tag a backend failure with the dashboard section it came from
async fn section<T>(
    name: &'static str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    fut.await.map_err(|e| match e {
        AnalyticsError::Backend(source) => AnalyticsError::Aggregation {
            section: name,
            source,
        },
        other => other,
    })
}

fn or_empty<T>(report: &'static str, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            error!(report, error = %e, "report failed, returning no rows");
            Vec::new()
        }
    }
}
