//! Geographic sales report
//!
//! Follows sale -> customer -> city -> country, so only places with at
//! least one sale appear.

use serde::{Deserialize, Serialize};

use crate::builder::{BuiltQuery, QueryBuilder};
use crate::filter::Filter;
use crate::reports::Report;

/// Sales for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicSales {
    pub country_name: String,
    pub city_name: String,
    pub total_sales: i64,
    pub total_revenue: f64,
    pub avg_sale_amount: f64,
    pub unique_customers: i64,
    pub products_sold: i64,
}

/// Sales per (country, city), by country name then revenue
pub struct GeographicSalesReport {
    filter: Filter,
}

impl GeographicSalesReport {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

impl Report for GeographicSalesReport {
    type Record = GeographicSales;

    fn name(&self) -> &'static str {
        "geographic_sales"
    }

    fn build_query(&self) -> BuiltQuery {
        QueryBuilder::new("sales s")
            .select_as("co.country_name", "country_name")
            .select_as("ci.city_name", "city_name")
            .select_as("COUNT(s.sales_id)", "total_sales")
            .select_as("SUM(s.total_price)", "total_revenue")
            .select_as("AVG(s.total_price)", "avg_sale_amount")
            .select_as("COUNT(DISTINCT s.customer_id)", "unique_customers")
            .select_as("COUNT(DISTINCT s.product_id)", "products_sold")
            .join("customers cu", "s.customer_id = cu.customer_id")
            .join("cities ci", "cu.city_id = ci.city_id")
            .join("countries co", "ci.country_id = co.country_id")
            .apply_filter(&self.filter, "s.sales_date")
            .group_by("co.country_id")
            .group_by("ci.city_id")
            .group_by("co.country_name")
            .group_by("ci.city_name")
            .order_by("co.country_name")
            .order_by_desc("total_revenue")
            .build()
    }
}
