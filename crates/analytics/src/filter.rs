//! Report filters and trend periods

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};
use crate::timerange::TimeRange;

/// Maximum allowed limit for report rows
pub const MAX_LIMIT: u32 = 10_000;

/// Optional restrictions applied to a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filter {
    /// Sales date range (None = all time)
    pub time_range: Option<TimeRange>,
    /// Result limit (max 10,000)
    pub limit: Option<u32>,
}

impl Filter {
    /// A filter covering all time with no limit
    pub fn all_time() -> Self {
        Self::default()
    }

    /// Restrict to a date range
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    /// Set result limit (capped at MAX_LIMIT)
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.min(MAX_LIMIT));
        self
    }
}

/// Time bucket for the sales trend report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One bucket per calendar day, `YYYY-MM-DD`
    #[default]
    Daily,
    /// One bucket per calendar month, `YYYY-MM`
    Monthly,
}

impl Period {
    /// Parse a period name; only `daily` and `monthly` are supported
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            _ => Err(AnalyticsError::InvalidArgument(format!(
                "period must be 'daily' or 'monthly', got '{}'",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }

    /// SQLite `strftime` pattern producing the bucket key
    pub fn strftime_pattern(&self) -> &'static str {
        match self {
            Self::Daily => "%Y-%m-%d",
            Self::Monthly => "%Y-%m",
        }
    }
}

impl FromStr for Period {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
