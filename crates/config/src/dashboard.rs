//! Dashboard configuration

use serde::Deserialize;

/// Dashboard configuration
///
/// ```toml
/// [dashboard]
/// top_n = 5
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Entries in the top products and top employees lists
    /// Default: 5
    pub top_n: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}
