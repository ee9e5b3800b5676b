//! Command implementations for the grocery CLI

pub mod dashboard;
pub mod init;
pub mod output;
pub mod report;
pub mod seed;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grocery_analytics::MetricsEngine;
use grocery_config::Config;
use grocery_query::{QueryConfig, QueryEngine};
use tracing::debug;

/// Config files tried when `--config` is not given
const DEFAULT_CONFIG_PATHS: &[&str] = &["configs/config.toml", "config.toml"];

/// Load the config file, falling back to defaults when none is found
///
/// An explicitly given path must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) if p.exists() => p.to_path_buf(),
        Some(p) => return Err(anyhow::anyhow!("config file not found: {}", p.display())),
        None => match DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
        {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };

    Config::from_file(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// Open the configured database read-only and wrap it in a metrics engine
pub async fn open_metrics_engine(config: &Config) -> Result<MetricsEngine> {
    let path = &config.database.path;
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "database not found: {} (run 'grocery init' and 'grocery seed' first)",
            path.display()
        ));
    }

    debug!(path = %path.display(), "opening database read-only");
    let query_config = QueryConfig::sqlite(path)
        .with_max_connections(config.database.max_connections)
        .with_read_only(true);

    let engine = QueryEngine::from_config(&query_config)
        .await
        .context("failed to create query engine")?;

    Ok(MetricsEngine::new(Box::new(engine)).with_top_n(config.dashboard.top_n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grocery.toml");
        std::fs::write(&path, "[dashboard]\ntop_n = 3\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.dashboard.top_n, 3);
    }

    #[tokio::test]
    async fn test_engine_requires_existing_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("absent.db");

        let err = open_metrics_engine(&config).await.err().unwrap();
        assert!(err.to_string().contains("grocery init"));
    }

    #[tokio::test]
    async fn test_seeded_database_serves_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("grocery.db");
        config.dashboard.top_n = 3;

        init::run(&config).await.unwrap();
        seed::run(&config).await.unwrap();
        assert!(seed::run(&config).await.is_err());

        let engine = open_metrics_engine(&config).await.unwrap();
        let snapshot = engine.try_dashboard().await.unwrap();
        assert!(snapshot.general_metrics.total_sales > 0);
        assert_eq!(snapshot.top_products.len(), 3);
    }
}
