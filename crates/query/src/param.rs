//! Bound query parameters
//!
//! Values are always passed to the backend as positional `?` parameters,
//! never interpolated into the SQL text.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Text format used for timestamps in the store
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text format used for calendar dates in the store
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A positional query parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryParam {
    /// SQL NULL
    Null,
    /// Signed integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// UTF-8 text
    Text(String),
}

impl From<i64> for QueryParam {
    fn from(v: i64) -> Self {
        QueryParam::Int(v)
    }
}

impl From<i32> for QueryParam {
    fn from(v: i32) -> Self {
        QueryParam::Int(v.into())
    }
}

impl From<u32> for QueryParam {
    fn from(v: u32) -> Self {
        QueryParam::Int(v.into())
    }
}

impl From<f64> for QueryParam {
    fn from(v: f64) -> Self {
        QueryParam::Float(v)
    }
}

impl From<&str> for QueryParam {
    fn from(v: &str) -> Self {
        QueryParam::Text(v.to_string())
    }
}

impl From<String> for QueryParam {
    fn from(v: String) -> Self {
        QueryParam::Text(v)
    }
}

impl From<NaiveDate> for QueryParam {
    fn from(v: NaiveDate) -> Self {
        QueryParam::Text(v.format(DATE_FORMAT).to_string())
    }
}

impl From<NaiveDateTime> for QueryParam {
    fn from(v: NaiveDateTime) -> Self {
        QueryParam::Text(v.format(DATETIME_FORMAT).to_string())
    }
}

impl<T: Into<QueryParam>> From<Option<T>> for QueryParam {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(QueryParam::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_use_store_text_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(QueryParam::from(date), QueryParam::Text("2024-03-09".into()));

        let ts = date.and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(
            QueryParam::from(ts),
            QueryParam::Text("2024-03-09 07:05:00".into())
        );
    }

    #[test]
    fn test_option_none_is_null() {
        assert_eq!(QueryParam::from(None::<i64>), QueryParam::Null);
        assert_eq!(QueryParam::from(Some(3i64)), QueryParam::Int(3));
    }
}
