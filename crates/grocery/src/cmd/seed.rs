//! Seed command - load the demo dataset

use anyhow::{Context, Result};
use grocery_config::Config;
use grocery_store::{Database, seed};
use owo_colors::OwoColorize;

pub async fn run(config: &Config) -> Result<()> {
    let path = &config.database.path;

    let db = Database::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;

    let summary = seed::load_demo(db.pool())
        .await
        .context("failed to load demo dataset")?;
    db.close().await;

    println!("{} demo dataset loaded into {}", "✓".green(), path.display().cyan());
    println!("  countries   {}", summary.countries);
    println!("  cities      {}", summary.cities);
    println!("  categories  {}", summary.categories);
    println!("  customers   {}", summary.customers);
    println!("  employees   {}", summary.employees);
    println!("  products    {}", summary.products);
    println!("  sales       {}", summary.sales);
    Ok(())
}
