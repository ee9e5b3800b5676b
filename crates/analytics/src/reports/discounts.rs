//! Discount effectiveness report

use serde::{Deserialize, Serialize};

use crate::builder::{BuiltQuery, QueryBuilder};
use crate::filter::Filter;
use crate::reports::Report;
use crate::segments::DiscountRange;

/// Sales within one discount bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountEffectiveness {
    pub discount_range: DiscountRange,
    pub total_sales: i64,
    pub avg_sale_amount: f64,
    pub total_revenue: f64,
    pub avg_quantity: f64,
    pub unique_customers: i64,
}

/// Sales per discount bucket, in bucket severity order
pub struct DiscountEffectivenessReport {
    filter: Filter,
}

impl DiscountEffectivenessReport {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

impl Report for DiscountEffectivenessReport {
    type Record = DiscountEffectiveness;

    fn name(&self) -> &'static str {
        "discount_effectiveness"
    }

    fn build_query(&self) -> BuiltQuery {
        QueryBuilder::new("sales s")
            .select_as(DiscountRange::sql_label_case("s.discount"), "discount_range")
            .select_as(DiscountRange::sql_ordinal_case("s.discount"), "range_order")
            .select_as("COUNT(s.sales_id)", "total_sales")
            .select_as("AVG(s.total_price)", "avg_sale_amount")
            .select_as("SUM(s.total_price)", "total_revenue")
            .select_as("AVG(s.quantity)", "avg_quantity")
            .select_as("COUNT(DISTINCT s.customer_id)", "unique_customers")
            .apply_filter(&self.filter, "s.sales_date")
            .group_by("range_order")
            .group_by("discount_range")
            .order_by("range_order")
            .build()
    }
}
