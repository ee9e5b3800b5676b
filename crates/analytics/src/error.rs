//! Analytics error types

use thiserror::Error;

/// Analytics errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Caller supplied an unsupported argument (e.g. trend period)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid time range
    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),

    /// A dashboard sub-query failed
    #[error("aggregation '{section}' failed: {source}")]
    Aggregation {
        /// Dashboard section that failed
        section: &'static str,
        #[source]
        source: grocery_query::QueryError,
    },

    /// Backend error (from grocery-query)
    #[error("backend error: {0}")]
    Backend(#[from] grocery_query::QueryError),
}

impl AnalyticsError {
    /// Whether this is a caller error rather than a data-access failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::InvalidTimeRange(_))
    }
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
