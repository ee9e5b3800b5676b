//! Dashboard command - executive dashboard followed by every report
//!
//! # Usage
//!
//! ```bash
//! grocery dashboard
//! grocery dashboard --range 90d --top-n 10
//! ```

use anyhow::Result;
use clap::Args;
use grocery_analytics::{DashboardSnapshot, Filter, MetricsEngine, RevenueEntry};
use grocery_config::Config;
use owo_colors::OwoColorize;

use super::output::format_currency;
use super::report::build_filter;

/// Rows shown for the product and customer sections
const SECTION_ROWS: usize = 5;

/// Trailing days shown for the daily trend
const TREND_DAYS: usize = 7;

/// Dashboard command arguments
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Sales date range for the report sections (all time when omitted)
    #[arg(short, long)]
    pub range: Option<String>,

    /// Entries in the top products and employees lists. Overrides config file.
    #[arg(long)]
    pub top_n: Option<u32>,
}

pub async fn run(args: DashboardArgs, config: &Config) -> Result<()> {
    let filter = build_filter(args.range.as_deref(), None)?;

    let mut engine = super::open_metrics_engine(config).await?;
    if let Some(top_n) = args.top_n {
        engine = engine.with_top_n(top_n);
    }

    let snapshot = engine.dashboard().await;
    print_snapshot(&snapshot);
    print_reports(&engine, &filter).await?;

    println!();
    Ok(())
}

fn heading(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

fn no_data() {
    println!("  {}", "(no data)".dimmed());
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    let general = &snapshot.general_metrics;

    heading("Executive Dashboard");
    println!("{}", "─".repeat(40));
    println!("{:<18}{}", "Total sales".yellow(), general.total_sales);
    println!(
        "{:<18}{}",
        "Total revenue".yellow(),
        format_currency(general.total_revenue)
    );
    println!(
        "{:<18}{}",
        "Average sale".yellow(),
        general
            .avg_sale_amount
            .map(format_currency)
            .unwrap_or_else(|| "-".to_string())
    );
    println!("{:<18}{}", "Customers".yellow(), general.unique_customers);
    println!("{:<18}{}", "Products sold".yellow(), general.products_sold);

    heading("Top Products");
    print_entries(&snapshot.top_products, |name| name.green().to_string());

    heading("Top Employees");
    print_entries(&snapshot.top_employees, |name| name.magenta().to_string());

    heading("Sales by Country");
    print_entries(&snapshot.sales_by_country, |name| name.blue().to_string());
}

fn print_entries(entries: &[RevenueEntry], paint: impl Fn(&str) -> String) {
    if entries.is_empty() {
        no_data();
        return;
    }
    for entry in entries {
        println!(" - {}: {}", paint(&entry.name), format_currency(entry.revenue));
    }
}

async fn print_reports(engine: &MetricsEngine, filter: &Filter) -> Result<()> {
    heading("Sales by Employee");
    let employees = engine.employee_performance(filter).await;
    if employees.is_empty() {
        no_data();
    }
    for r in &employees {
        println!(
            "#{} {}: {} sales - {}",
            r.revenue_rank,
            r.employee_name,
            r.total_sales,
            format_currency(r.total_revenue)
        );
    }

    heading("Geographic Sales");
    let geography = engine.geographic_sales(filter).await;
    if geography.is_empty() {
        no_data();
    }
    for r in &geography {
        println!(
            "{} - {}: {}",
            r.country_name,
            r.city_name,
            format_currency(r.total_revenue)
        );
    }

    heading("Product Performance");
    let products = engine.product_performance(filter).await;
    if products.is_empty() {
        no_data();
    }
    for r in products.iter().take(SECTION_ROWS) {
        println!(
            "{} ({}): {} units - {}",
            r.product_name,
            r.category_name.as_deref().unwrap_or("-"),
            r.total_units_sold,
            format_currency(r.total_revenue)
        );
    }

    heading("Customer Segments");
    let customers = engine.customer_segmentation(filter).await;
    if customers.is_empty() {
        no_data();
    }
    for r in customers.iter().take(SECTION_ROWS) {
        println!(
            "{} ({}, {}): {}",
            r.customer_name,
            r.customer_segment,
            r.purchase_frequency,
            format_currency(r.total_spent)
        );
    }

    heading("Daily Sales Trend");
    let trends = engine.sales_trends("daily", filter).await?;
    if trends.is_empty() {
        no_data();
    }
    let skip = trends.len().saturating_sub(TREND_DAYS);
    for r in trends.iter().skip(skip) {
        println!("{}: {}", r.period, format_currency(r.total_revenue));
    }

    heading("Discount Effectiveness");
    let discounts = engine.discount_effectiveness(filter).await;
    if discounts.is_empty() {
        no_data();
    }
    for r in &discounts {
        println!(
            "{}: {} sales - {}",
            r.discount_range,
            r.total_sales,
            format_currency(r.total_revenue)
        );
    }

    Ok(())
}
