//! Customer segmentation report
//!
//! Every customer appears. Segment and frequency are classified from the
//! aggregated totals after decoding.

use chrono::{NaiveDate, NaiveDateTime};
use grocery_query::QueryParam;
use serde::{Deserialize, Serialize};

use crate::builder::{BuiltQuery, QueryBuilder, range_clause};
use crate::filter::Filter;
use crate::reports::Report;
use crate::segments::{CustomerSegment, PurchaseFrequency};

/// Purchase behaviour of one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: i64,
    pub customer_name: String,
    pub city_name: Option<String>,
    pub country_name: Option<String>,
    pub total_purchases: i64,
    pub total_spent: f64,
    pub avg_purchase_amount: Option<f64>,
    pub last_purchase_date: Option<NaiveDateTime>,
    pub days_since_last_purchase: Option<i64>,
    #[serde(default)]
    pub customer_segment: CustomerSegment,
    #[serde(default)]
    pub purchase_frequency: PurchaseFrequency,
}

/// Customer segmentation by total spend
pub struct CustomerSegmentationReport {
    filter: Filter,
    as_of: NaiveDate,
}

impl CustomerSegmentationReport {
    /// Recency is measured in days before `as_of`
    pub fn new(filter: Filter, as_of: NaiveDate) -> Self {
        Self { filter, as_of }
    }
}

impl Report for CustomerSegmentationReport {
    type Record = CustomerProfile;

    fn name(&self) -> &'static str {
        "customer_segmentation"
    }

    fn build_query(&self) -> BuiltQuery {
        let on = "c.customer_id = s.customer_id";
        let builder = QueryBuilder::new("customers c")
            .select_as("c.customer_id", "customer_id")
            .select_as("c.first_name || ' ' || c.last_name", "customer_name")
            .select_as("ci.city_name", "city_name")
            .select_as("co.country_name", "country_name")
            .select_as("COUNT(s.sales_id)", "total_purchases")
            .select_as("COALESCE(SUM(s.total_price), 0.0)", "total_spent")
            .select_as("AVG(s.total_price)", "avg_purchase_amount")
            .select_as(
                "strftime('%Y-%m-%dT%H:%M:%S', MAX(s.sales_date))",
                "last_purchase_date",
            )
            .select_bound(
                "CAST(julianday(?) - julianday(date(MAX(s.sales_date))) AS INTEGER)",
                "days_since_last_purchase",
                [QueryParam::from(self.as_of)],
            );

        let builder = match &self.filter.time_range {
            Some(range) => {
                let (clause, params) = range_clause("s.sales_date", range);
                builder.left_join_bound("sales s", format!("{} AND {}", on, clause), params)
            }
            None => builder.left_join("sales s", on),
        };

        builder
            .left_join("cities ci", "c.city_id = ci.city_id")
            .left_join("countries co", "ci.country_id = co.country_id")
            .group_by("c.customer_id")
            .group_by("c.first_name")
            .group_by("c.last_name")
            .group_by("ci.city_name")
            .group_by("co.country_name")
            .order_by_desc("total_spent")
            .order_by("c.customer_id")
            .apply_limit(&self.filter)
            .build()
    }

    fn finish(&self, records: Vec<CustomerProfile>) -> Vec<CustomerProfile> {
        records
            .into_iter()
            .map(|mut record| {
                record.customer_segment = CustomerSegment::classify(record.total_spent);
                record.purchase_frequency = PurchaseFrequency::classify(record.total_purchases);
                record
            })
            .collect()
    }
}
