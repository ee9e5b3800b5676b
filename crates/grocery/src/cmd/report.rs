//! Report command - run a single sales report
//!
//! # Usage
//!
//! ```bash
//! grocery report employees --range 30d
//! grocery report geography
//! grocery report products --limit 10 --format json
//! grocery report customers --range ytd
//! grocery report trends --period monthly
//! grocery report discounts --format csv
//! ```

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use grocery_analytics::{Filter, MetricsEngine, TimeRange};
use grocery_config::Config;
use grocery_query::OutputFormat;

use super::output::{Tabular, render};

/// Report command arguments
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report to run
    #[arg(value_enum)]
    pub kind: ReportKind,

    /// Sales date range (e.g., 7d, 30d, 3m, today, ytd, 2024-01-01,2024-01-31).
    /// All time when omitted.
    #[arg(short, long)]
    pub range: Option<String>,

    /// Trend period (daily, monthly)
    #[arg(short, long, default_value = "daily")]
    pub period: String,

    /// Maximum number of rows
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    /// Performance and revenue rank per sales person
    Employees,
    /// Sales per country and city
    Geography,
    /// Performance per product
    Products,
    /// Spend, recency and segment per customer
    Customers,
    /// Sales per day or month
    Trends,
    /// Sales per discount bucket
    Discounts,
}

/// Run the report command
pub async fn run(args: ReportArgs, config: &Config) -> Result<()> {
    let format: OutputFormat = args
        .format
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid format: {}", e))?;

    let filter = build_filter(args.range.as_deref(), args.limit)?;
    let engine = super::open_metrics_engine(config).await?;

    let rows = match args.kind {
        ReportKind::Employees => emit(&engine.employee_performance(&filter).await, format)?,
        ReportKind::Geography => emit(&engine.geographic_sales(&filter).await, format)?,
        ReportKind::Products => emit(&engine.product_performance(&filter).await, format)?,
        ReportKind::Customers => emit(&engine.customer_segmentation(&filter).await, format)?,
        ReportKind::Trends => {
            let trends = engine
                .sales_trends(&args.period, &filter)
                .await
                .context("invalid trend period")?;
            emit(&trends, format)?
        }
        ReportKind::Discounts => emit(&engine.discount_effectiveness(&filter).await, format)?,
    };

    print_summary(&engine, rows, &filter);
    Ok(())
}

/// Build a report filter from CLI arguments
pub fn build_filter(range: Option<&str>, limit: Option<u32>) -> Result<Filter> {
    let mut filter = Filter::all_time();

    if let Some(range) = range {
        let range = TimeRange::parse(range)
            .map_err(|e| anyhow::anyhow!("invalid time range: {}", e))?;
        filter = filter.with_time_range(range);
    }

    if let Some(limit) = limit {
        filter = filter.with_limit(limit);
    }

    Ok(filter)
}

fn emit<T: Tabular>(rows: &[T], format: OutputFormat) -> Result<usize> {
    println!("{}", render(rows, format)?);
    Ok(rows.len())
}

fn print_summary(engine: &MetricsEngine, rows: usize, filter: &Filter) {
    let range = filter
        .time_range
        .map(|r| r.to_string())
        .unwrap_or_else(|| "all time".to_string());
    eprintln!("\n{} row(s), {} [{}]", rows, range, engine.backend_name());
}
