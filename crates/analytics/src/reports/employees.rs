//! Employee performance report
//!
//! Every employee appears, including those without sales in the range.

use serde::{Deserialize, Serialize};

use crate::builder::{BuiltQuery, QueryBuilder, range_clause};
use crate::filter::Filter;
use crate::reports::Report;

/// Sales performance of one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePerformance {
    pub employee_id: i64,
    pub employee_name: String,
    pub total_sales: i64,
    pub total_revenue: f64,
    /// `None` when the employee has no sales
    pub avg_sale_amount: Option<f64>,
    pub total_units_sold: i64,
    pub unique_customers_served: i64,
    /// Rank by revenue; ties share a rank and the next rank skips
    pub revenue_rank: i64,
}

/// Employee performance, optionally restricted to a date range
pub struct EmployeePerformanceReport {
    filter: Filter,
}

impl EmployeePerformanceReport {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

impl Report for EmployeePerformanceReport {
    type Record = EmployeePerformance;

    fn name(&self) -> &'static str {
        "employee_performance"
    }

    fn build_query(&self) -> BuiltQuery {
        let on = "s.sales_person_id = e.employee_id";
        let builder = QueryBuilder::new("employees e")
            .select_as("e.employee_id", "employee_id")
            .select_as("e.first_name || ' ' || e.last_name", "employee_name")
            .select_as("COUNT(s.sales_id)", "total_sales")
            .select_as("COALESCE(SUM(s.total_price), 0.0)", "total_revenue")
            .select_as("AVG(s.total_price)", "avg_sale_amount")
            .select_as("COALESCE(SUM(s.quantity), 0)", "total_units_sold")
            .select_as("COUNT(DISTINCT s.customer_id)", "unique_customers_served")
            .select_as(
                "RANK() OVER (ORDER BY COALESCE(SUM(s.total_price), 0.0) DESC)",
                "revenue_rank",
            );

        let builder = match &self.filter.time_range {
            Some(range) => {
                let (clause, params) = range_clause("s.sales_date", range);
                builder.left_join_bound("sales s", format!("{} AND {}", on, clause), params)
            }
            None => builder.left_join("sales s", on),
        };

        builder
            .group_by("e.employee_id")
            .group_by("e.first_name")
            .group_by("e.last_name")
            .order_by_desc("total_revenue")
            .order_by("e.employee_id")
            .apply_limit(&self.filter)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, at, at_hms, range};

    #[test]
    fn test_range_goes_in_join_condition() {
        let filter = Filter::all_time().with_time_range(range((2024, 1, 1), (2024, 1, 31)));
        let query = EmployeePerformanceReport::new(filter).build_query();

        assert!(query.sql.contains(
            "LEFT JOIN sales s ON s.sales_person_id = e.employee_id AND s.sales_date BETWEEN ? AND ?"
        ));
        assert!(!query.sql.contains("WHERE"));
        assert_eq!(query.params.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_facts() {
        let fx = Fixture::new().await;
        let rows = EmployeePerformanceReport::new(Filter::all_time())
            .execute(&fx.backend())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_single_employee_totals() {
        let mut fx = Fixture::new().await;
        let juan = fx.employee("Juan", "Perez").await;
        let ana = fx.customer("Ana", "Lima").await;
        let milk = fx.product("Milk", 2.0).await;

        for (total, qty) in [(100.0, 1), (200.0, 2), (50.0, 3)] {
            fx.sale(juan, ana, milk, qty, total, 0.0, at(2024, 3, 1, 10)).await;
        }

        let rows = EmployeePerformanceReport::new(Filter::all_time())
            .execute(&fx.backend())
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.employee_name, "Juan Perez");
        assert_eq!(row.total_sales, 3);
        assert!((row.total_revenue - 350.0).abs() < 1e-9);
        assert!((row.avg_sale_amount.unwrap() - 116.67).abs() < 0.01);
        assert_eq!(row.total_units_sold, 6);
        assert_eq!(row.unique_customers_served, 1);
        assert_eq!(row.revenue_rank, 1);
    }

    #[tokio::test]
    async fn test_ties_share_rank_and_idle_employee_kept() {
        let mut fx = Fixture::new().await;
        let a = fx.employee("Alma", "A").await;
        let b = fx.employee("Bruno", "B").await;
        let c = fx.employee("Celia", "C").await;
        let idle = fx.employee("Dario", "D").await;
        let ana = fx.customer("Ana", "Lima").await;
        let milk = fx.product("Milk", 2.0).await;

        fx.sale(a, ana, milk, 1, 100.0, 0.0, at(2024, 3, 1, 10)).await;
        fx.sale(b, ana, milk, 1, 100.0, 0.0, at(2024, 3, 1, 11)).await;
        fx.sale(c, ana, milk, 1, 50.0, 0.0, at(2024, 3, 1, 12)).await;

        let rows = EmployeePerformanceReport::new(Filter::all_time())
            .execute(&fx.backend())
            .await
            .unwrap();

        let ranks: Vec<(i64, i64)> = rows.iter().map(|r| (r.employee_id, r.revenue_rank)).collect();
        assert_eq!(ranks, vec![(a, 1), (b, 1), (c, 3), (idle, 4)]);

        let idle_row = &rows[3];
        assert_eq!(idle_row.total_sales, 0);
        assert_eq!(idle_row.total_revenue, 0.0);
        assert_eq!(idle_row.avg_sale_amount, None);
        assert_eq!(idle_row.unique_customers_served, 0);
    }

    #[tokio::test]
    async fn test_date_range_keeps_employees_outside_it() {
        let mut fx = Fixture::new().await;
        let early = fx.employee("Eva", "Early").await;
        let late = fx.employee("Leo", "Late").await;
        let ana = fx.customer("Ana", "Lima").await;
        let milk = fx.product("Milk", 2.0).await;

        fx.sale(early, ana, milk, 1, 30.0, 0.0, at(2024, 1, 10, 9)).await;
        fx.sale(late, ana, milk, 1, 40.0, 0.0, at(2024, 2, 10, 9)).await;
        // Last second of the range is included
        fx.sale(late, ana, milk, 1, 5.0, 0.0, at_hms(2024, 1, 31, 23, 59, 59)).await;

        let filter = Filter::all_time().with_time_range(range((2024, 1, 1), (2024, 1, 31)));
        let rows = EmployeePerformanceReport::new(filter)
            .execute(&fx.backend())
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].employee_id, early);
        assert!((rows[0].total_revenue - 30.0).abs() < 1e-9);
        assert_eq!(rows[1].employee_id, late);
        assert_eq!(rows[1].total_sales, 1);
        assert!((rows[1].total_revenue - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_limit() {
        let mut fx = Fixture::new().await;
        for name in ["A", "B", "C"] {
            fx.employee(name, "X").await;
        }
        let rows = EmployeePerformanceReport::new(Filter::all_time().with_limit(2))
            .execute(&fx.backend())
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }
}
