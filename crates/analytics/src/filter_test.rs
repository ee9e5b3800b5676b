//! Tests for filters and periods

use chrono::NaiveDate;

use crate::error::AnalyticsError;
use crate::filter::{Filter, MAX_LIMIT, Period};
use crate::timerange::TimeRange;

#[test]
fn test_period_parse() {
    assert_eq!(Period::parse("daily").unwrap(), Period::Daily);
    assert_eq!(Period::parse("Monthly").unwrap(), Period::Monthly);
    assert_eq!(" DAILY ".parse::<Period>().unwrap(), Period::Daily);
}

#[test]
fn test_period_parse_rejects_other_granularities() {
    for s in ["yearly", "weekly", "hourly", "day", ""] {
        let err = Period::parse(s).unwrap_err();
        assert!(
            matches!(err, AnalyticsError::InvalidArgument(_)),
            "expected InvalidArgument for {:?}",
            s
        );
        assert!(err.is_invalid_argument());
    }
}

#[test]
fn test_period_patterns() {
    assert_eq!(Period::Daily.strftime_pattern(), "%Y-%m-%d");
    assert_eq!(Period::Monthly.strftime_pattern(), "%Y-%m");
    assert_eq!(Period::default(), Period::Daily);
    assert_eq!(Period::Monthly.to_string(), "monthly");
}

#[test]
fn test_filter_limit_is_capped() {
    let filter = Filter::all_time().with_limit(u32::MAX);
    assert_eq!(filter.limit, Some(MAX_LIMIT));
    assert_eq!(Filter::all_time().with_limit(5).limit, Some(5));
}

#[test]
fn test_filter_time_range() {
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let range = TimeRange::new(day, day).unwrap();
    let filter = Filter::all_time().with_time_range(range);
    assert_eq!(filter.time_range, Some(range));
    assert_eq!(Filter::all_time().time_range, None);
}
