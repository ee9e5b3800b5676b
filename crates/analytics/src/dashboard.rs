//! Executive dashboard
//!
//! Four independent aggregations: overall totals, top products, top
//! employees and revenue per country. The engine runs them concurrently
//! and treats the snapshot as all-or-nothing.

use serde::{Deserialize, Serialize};

use crate::builder::{BuiltQuery, QueryBuilder, revenue_by_query};
use crate::reports::Report;

/// Default number of entries in the top products/employees lists
pub const DEFAULT_TOP_N: u32 = 5;

/// Totals across all sales
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralMetrics {
    pub total_sales: i64,
    pub total_revenue: f64,
    /// `None` when there are no sales
    pub avg_sale_amount: Option<f64>,
    pub unique_customers: i64,
    pub products_sold: i64,
}

/// A named revenue total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub name: String,
    pub revenue: f64,
}

/// The composed dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub general_metrics: GeneralMetrics,
    pub top_products: Vec<RevenueEntry>,
    pub top_employees: Vec<RevenueEntry>,
    pub sales_by_country: Vec<RevenueEntry>,
}

impl DashboardSnapshot {
    /// Zero totals and empty lists
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether there is nothing to display
    pub fn is_empty(&self) -> bool {
        self.general_metrics.total_sales == 0
            && self.top_products.is_empty()
            && self.top_employees.is_empty()
            && self.sales_by_country.is_empty()
    }
}

/// Overall totals; always exactly one row
pub struct GeneralMetricsQuery;

impl Report for GeneralMetricsQuery {
    type Record = GeneralMetrics;

    fn name(&self) -> &'static str {
        "general_metrics"
    }

    fn build_query(&self) -> BuiltQuery {
        QueryBuilder::new("sales s")
            .select_as("COUNT(s.sales_id)", "total_sales")
            .select_as("COALESCE(SUM(s.total_price), 0.0)", "total_revenue")
            .select_as("AVG(s.total_price)", "avg_sale_amount")
            .select_as("COUNT(DISTINCT s.customer_id)", "unique_customers")
            .select_as("COUNT(DISTINCT s.product_id)", "products_sold")
            .build()
    }
}

/// Revenue summed per name, highest first
pub struct RevenueLeaderboard {
    name: &'static str,
    name_expr: &'static str,
    joins: &'static [(&'static str, &'static str)],
    group_by: &'static str,
    limit: Option<u32>,
}

impl RevenueLeaderboard {
    /// Products with the highest revenue
    pub fn top_products(limit: u32) -> Self {
        Self {
            name: "top_products",
            name_expr: "p.product_name",
            joins: &[("products p", "s.product_id = p.product_id")],
            group_by: "p.product_id, p.product_name",
            limit: Some(limit),
        }
    }

    /// Employees with the highest revenue
    pub fn top_employees(limit: u32) -> Self {
        Self {
            name: "top_employees",
            name_expr: "e.first_name || ' ' || e.last_name",
            joins: &[("employees e", "s.sales_person_id = e.employee_id")],
            group_by: "e.employee_id, e.first_name, e.last_name",
            limit: Some(limit),
        }
    }

    /// Every country with at least one sale
    pub fn sales_by_country() -> Self {
        Self {
            name: "sales_by_country",
            name_expr: "co.country_name",
            joins: &[
                ("customers cu", "s.customer_id = cu.customer_id"),
                ("cities ci", "cu.city_id = ci.city_id"),
                ("countries co", "ci.country_id = co.country_id"),
            ],
            group_by: "co.country_id, co.country_name",
            limit: None,
        }
    }
}

impl Report for RevenueLeaderboard {
    type Record = RevenueEntry;

    fn name(&self) -> &'static str {
        self.name
    }

    fn build_query(&self) -> BuiltQuery {
        revenue_by_query(self.name_expr, self.joins, self.group_by, self.limit)
    }
}
