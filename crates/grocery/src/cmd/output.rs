//! Report rendering: table, JSON and CSV

use anyhow::Result;
use grocery_analytics::{
    CustomerProfile, DiscountEffectiveness, EmployeePerformance, GeographicSales,
    ProductPerformance, RevenueEntry, SalesTrend,
};
use grocery_query::OutputFormat;
use serde::Serialize;

/// Maximum rendered width of a table column
const MAX_COLUMN_WIDTH: usize = 40;

/// A record that can be rendered as a table or CSV row
pub trait Tabular: Serialize {
    /// Column headers, in display order
    const HEADERS: &'static [&'static str];

    /// One cell per header
    fn cells(&self) -> Vec<String>;
}

/// Render rows in the requested format
pub fn render<T: Tabular>(rows: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => Ok(render_csv(rows)),
    }
}

fn render_table<T: Tabular>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "(no data)".to_string();
    }

    let cells: Vec<Vec<String>> = rows.iter().map(Tabular::cells).collect();

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, value) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(value.chars().count()).min(MAX_COLUMN_WIDTH);
            }
        }
    }

    let mut out = Vec::with_capacity(cells.len() + 2);

    let header: Vec<String> = T::HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:width$}", h, width = *w))
        .collect();
    out.push(header.join(" | "));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push(sep.join("-+-"));

    for row in &cells {
        let values: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:width$}", truncate(v, *w), width = *w))
            .collect();
        out.push(values.join(" | "));
    }

    out.join("\n")
}

fn render_csv<T: Tabular>(rows: &[T]) -> String {
    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(T::HEADERS.join(","));
    for row in rows {
        let values: Vec<String> = row.cells().iter().map(|v| csv_escape(v)).collect();
        out.push(values.join(","));
    }
    out.join("\n")
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Escape value for CSV output
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('\n') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Format a monetary amount as `$1,234.50`
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{}", sign, grouped, cents)
}

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn optional_amount(value: Option<f64>) -> String {
    value.map(amount).unwrap_or_else(|| "-".to_string())
}

impl Tabular for EmployeePerformance {
    const HEADERS: &'static [&'static str] = &[
        "rank",
        "employee",
        "sales",
        "revenue",
        "avg_sale",
        "units",
        "customers",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.revenue_rank.to_string(),
            self.employee_name.clone(),
            self.total_sales.to_string(),
            amount(self.total_revenue),
            optional_amount(self.avg_sale_amount),
            self.total_units_sold.to_string(),
            self.unique_customers_served.to_string(),
        ]
    }
}

impl Tabular for GeographicSales {
    const HEADERS: &'static [&'static str] = &[
        "country",
        "city",
        "sales",
        "revenue",
        "avg_sale",
        "customers",
        "products",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.country_name.clone(),
            self.city_name.clone(),
            self.total_sales.to_string(),
            amount(self.total_revenue),
            amount(self.avg_sale_amount),
            self.unique_customers.to_string(),
            self.products_sold.to_string(),
        ]
    }
}

impl Tabular for ProductPerformance {
    const HEADERS: &'static [&'static str] = &[
        "product",
        "category",
        "class",
        "sales",
        "units",
        "revenue",
        "customers",
        "price",
        "avg_price",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            self.category_name.clone().unwrap_or_else(|| "-".to_string()),
            self.product_class.clone(),
            self.total_sales.to_string(),
            self.total_units_sold.to_string(),
            amount(self.total_revenue),
            self.unique_customers.to_string(),
            amount(self.current_price),
            optional_amount(self.avg_selling_price),
        ]
    }
}

impl Tabular for CustomerProfile {
    const HEADERS: &'static [&'static str] = &[
        "customer",
        "city",
        "country",
        "purchases",
        "spent",
        "last_purchase",
        "days_since",
        "segment",
        "frequency",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.city_name.clone().unwrap_or_else(|| "-".to_string()),
            self.country_name.clone().unwrap_or_else(|| "-".to_string()),
            self.total_purchases.to_string(),
            amount(self.total_spent),
            self.last_purchase_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.days_since_last_purchase
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.customer_segment.as_str().to_string(),
            self.purchase_frequency.as_str().to_string(),
        ]
    }
}

impl Tabular for SalesTrend {
    const HEADERS: &'static [&'static str] =
        &["period", "sales", "revenue", "avg_sale", "units", "customers"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.period.clone(),
            self.total_sales.to_string(),
            amount(self.total_revenue),
            amount(self.avg_sale_amount),
            self.total_units_sold.to_string(),
            self.unique_customers.to_string(),
        ]
    }
}

impl Tabular for DiscountEffectiveness {
    const HEADERS: &'static [&'static str] = &[
        "discount",
        "sales",
        "avg_sale",
        "revenue",
        "avg_quantity",
        "customers",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.discount_range.label().to_string(),
            self.total_sales.to_string(),
            amount(self.avg_sale_amount),
            amount(self.total_revenue),
            format!("{:.1}", self.avg_quantity),
            self.unique_customers.to_string(),
        ]
    }
}

impl Tabular for RevenueEntry {
    const HEADERS: &'static [&'static str] = &["name", "revenue"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), amount(self.revenue)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<RevenueEntry> {
        vec![
            RevenueEntry {
                name: "Bread, whole wheat".to_string(),
                revenue: 120.5,
            },
            RevenueEntry {
                name: "Milk".to_string(),
                revenue: 80.0,
            },
        ]
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(2.5), "$2.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-45.1), "-$45.10");
    }

    #[test]
    fn test_empty_table_says_no_data() {
        let rows: Vec<RevenueEntry> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(no data)");
        assert_eq!(render(&rows, OutputFormat::Json).unwrap(), "[]");
        assert_eq!(render(&rows, OutputFormat::Csv).unwrap(), "name,revenue");
    }

    #[test]
    fn test_table_layout() {
        let table = render(&entries(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "name               | revenue");
        assert_eq!(lines[1], "-------------------+--------");
        assert_eq!(lines[3], "Milk               | 80.00  ");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let csv = render(&entries(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "\"Bread, whole wheat\",120.50");
        assert_eq!(lines[2], "Milk,80.00");
    }

    #[test]
    fn test_json_keeps_field_names() {
        let json = render(&entries(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1]["name"], "Milk");
        assert_eq!(parsed[1]["revenue"], 80.0);
    }

    #[test]
    fn test_truncate_long_cells() {
        assert_eq!(truncate("abcdef", 10), "abcdef");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
