//! Init command - create the database schema

use anyhow::{Context, Result};
use grocery_config::Config;
use grocery_store::Database;
use owo_colors::OwoColorize;

pub async fn run(config: &Config) -> Result<()> {
    let path = &config.database.path;

    let db = Database::open(path)
        .await
        .with_context(|| format!("failed to initialize {}", path.display()))?;
    db.close().await;

    println!("{} schema ready at {}", "✓".green(), path.display().cyan());
    Ok(())
}
