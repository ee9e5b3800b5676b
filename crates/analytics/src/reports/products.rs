//! Product performance report
//!
//! Every product appears; unsold products have zero totals and no averages.

use serde::{Deserialize, Serialize};

use crate::builder::{BuiltQuery, QueryBuilder, range_clause};
use crate::filter::Filter;
use crate::reports::Report;

/// Sales performance of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPerformance {
    pub product_id: i64,
    pub product_name: String,
    pub category_name: Option<String>,
    pub product_class: String,
    pub total_sales: i64,
    pub total_units_sold: i64,
    pub total_revenue: f64,
    pub avg_sale_amount: Option<f64>,
    pub unique_customers: i64,
    /// List price from the catalog
    pub current_price: f64,
    /// Revenue per unit, rounded to cents; `None` when nothing was sold
    pub avg_selling_price: Option<f64>,
}

/// Product performance by revenue
pub struct ProductPerformanceReport {
    filter: Filter,
}

impl ProductPerformanceReport {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

impl Report for ProductPerformanceReport {
    type Record = ProductPerformance;

    fn name(&self) -> &'static str {
        "product_performance"
    }

    fn build_query(&self) -> BuiltQuery {
        let on = "p.product_id = s.product_id";
        let builder = QueryBuilder::new("products p")
            .select_as("p.product_id", "product_id")
            .select_as("p.product_name", "product_name")
            .select_as("c.category_name", "category_name")
            .select_as("p.class", "product_class")
            .select_as("COUNT(s.sales_id)", "total_sales")
            .select_as("COALESCE(SUM(s.quantity), 0)", "total_units_sold")
            .select_as("COALESCE(SUM(s.total_price), 0.0)", "total_revenue")
            .select_as("AVG(s.total_price)", "avg_sale_amount")
            .select_as("COUNT(DISTINCT s.customer_id)", "unique_customers")
            .select_as("p.price", "current_price")
            .select_as(
                "ROUND(SUM(s.total_price) / NULLIF(SUM(s.quantity), 0), 2)",
                "avg_selling_price",
            );

        let builder = match &self.filter.time_range {
            Some(range) => {
                let (clause, params) = range_clause("s.sales_date", range);
                builder.left_join_bound("sales s", format!("{} AND {}", on, clause), params)
            }
            None => builder.left_join("sales s", on),
        };

        builder
            .left_join("categories c", "p.category_id = c.category_id")
            .group_by("p.product_id")
            .group_by("p.product_name")
            .group_by("c.category_name")
            .group_by("p.class")
            .group_by("p.price")
            .order_by_desc("total_revenue")
            .order_by("p.product_name")
            .apply_limit(&self.filter)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, at, range};

    #[tokio::test]
    async fn test_empty_facts() {
        let fx = Fixture::new().await;
        let rows = ProductPerformanceReport::new(Filter::all_time())
            .execute(&fx.backend())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_unsold_product_has_no_avg_selling_price() {
        let mut fx = Fixture::new().await;
        let emp = fx.employee("Juan", "Perez").await;
        let ana = fx.customer("Ana", "Lima").await;
        let cheese = fx.product_in("Cheese", 9.5, "Dairy").await;
        fx.product_in("Caviar", 120.0, "Deli").await;

        fx.sale(emp, ana, cheese, 3, 25.0, 0.0, at(2024, 2, 1, 9)).await;
        fx.sale(emp, ana, cheese, 1, 9.5, 0.0, at(2024, 2, 2, 9)).await;

        let rows = ProductPerformanceReport::new(Filter::all_time())
            .execute(&fx.backend())
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let sold = &rows[0];
        assert_eq!(sold.product_name, "Cheese");
        assert_eq!(sold.category_name.as_deref(), Some("Dairy"));
        assert_eq!(sold.product_class, "Regular");
        assert_eq!(sold.total_sales, 2);
        assert_eq!(sold.total_units_sold, 4);
        assert!((sold.total_revenue - 34.5).abs() < 1e-9);
        assert_eq!(sold.current_price, 9.5);
        // 34.5 / 4 = 8.625
        assert!((sold.avg_selling_price.unwrap() - 8.63).abs() < 0.006);

        let unsold = &rows[1];
        assert_eq!(unsold.product_name, "Caviar");
        assert_eq!(unsold.total_sales, 0);
        assert_eq!(unsold.total_units_sold, 0);
        assert_eq!(unsold.total_revenue, 0.0);
        assert_eq!(unsold.avg_sale_amount, None);
        assert_eq!(unsold.avg_selling_price, None);
        assert_eq!(unsold.current_price, 120.0);
    }

    #[test]
    fn test_range_goes_in_join_condition() {
        let filter = Filter::all_time().with_time_range(range((2024, 1, 1), (2024, 1, 31)));
        let query = ProductPerformanceReport::new(filter).build_query();

        assert!(query.sql.contains(
            "LEFT JOIN sales s ON p.product_id = s.product_id AND s.sales_date BETWEEN ? AND ?"
        ));
        assert!(!query.sql.contains("WHERE"));
        assert_eq!(query.params.len(), 2);
    }

    #[tokio::test]
    async fn test_date_range_keeps_products_outside_it() {
        let mut fx = Fixture::new().await;
        let emp = fx.employee("Juan", "Perez").await;
        let ana = fx.customer("Ana", "Lima").await;
        let cheese = fx.product("Cheese", 5.0).await;
        let bread = fx.product("Bread", 3.0).await;

        fx.sale(emp, ana, cheese, 2, 10.0, 0.0, at(2024, 1, 5, 9)).await;
        fx.sale(emp, ana, cheese, 5, 500.0, 0.0, at(2024, 3, 1, 9)).await;
        fx.sale(emp, ana, bread, 1, 3.0, 0.0, at(2024, 2, 1, 9)).await;

        let filter = Filter::all_time().with_time_range(range((2024, 1, 1), (2024, 1, 31)));
        let rows = ProductPerformanceReport::new(filter)
            .execute(&fx.backend())
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let sold = &rows[0];
        assert_eq!(sold.product_id, cheese);
        assert_eq!(sold.total_sales, 1);
        assert_eq!(sold.total_units_sold, 2);
        assert!((sold.total_revenue - 10.0).abs() < 1e-9);
        assert_eq!(sold.avg_selling_price, Some(5.0));

        let unsold = &rows[1];
        assert_eq!(unsold.product_id, bread);
        assert_eq!(unsold.total_sales, 0);
        assert_eq!(unsold.total_revenue, 0.0);
        assert_eq!(unsold.unique_customers, 0);
        assert_eq!(unsold.avg_selling_price, None);
    }
}
