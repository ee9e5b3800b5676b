//! Sales trend report
//!
//! The bucket expression comes from [`Period`], never from caller text.

use serde::{Deserialize, Serialize};

use crate::builder::{BuiltQuery, QueryBuilder};
use crate::filter::{Filter, Period};
use crate::reports::Report;

/// Sales within one day or month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTrend {
    /// `YYYY-MM-DD` or `YYYY-MM`
    pub period: String,
    pub total_sales: i64,
    pub total_revenue: f64,
    pub avg_sale_amount: f64,
    pub total_units_sold: i64,
    pub unique_customers: i64,
}

/// Sales per period, oldest first
pub struct SalesTrendReport {
    period: Period,
    filter: Filter,
}

impl SalesTrendReport {
    pub fn new(period: Period, filter: Filter) -> Self {
        Self { period, filter }
    }
}

impl Report for SalesTrendReport {
    type Record = SalesTrend;

    fn name(&self) -> &'static str {
        match self.period {
            Period::Daily => "sales_trends_daily",
            Period::Monthly => "sales_trends_monthly",
        }
    }

    fn build_query(&self) -> BuiltQuery {
        let bucket = format!(
            "strftime('{}', s.sales_date)",
            self.period.strftime_pattern()
        );

        QueryBuilder::new("sales s")
            .select_as(&bucket, "period")
            .select_as("COUNT(s.sales_id)", "total_sales")
            .select_as("SUM(s.total_price)", "total_revenue")
            .select_as("AVG(s.total_price)", "avg_sale_amount")
            .select_as("SUM(s.quantity)", "total_units_sold")
            .select_as("COUNT(DISTINCT s.customer_id)", "unique_customers")
            .apply_filter(&self.filter, "s.sales_date")
            .group_by(bucket)
            .order_by("period")
            .build()
    }
}
