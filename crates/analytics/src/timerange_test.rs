//! Tests for time range parsing

use chrono::NaiveDate;

use crate::error::AnalyticsError;
use crate::timerange::TimeRange;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_relative_days() {
    let today = date(2024, 3, 15);
    let range = TimeRange::parse_at("7d", today).unwrap();
    assert_eq!(range.days(), 7);
    assert_eq!(range.start, date(2024, 3, 9));
    assert_eq!(range.end, today);

    let range = TimeRange::parse_at("30d", today).unwrap();
    assert_eq!(range.days(), 30);
}

#[test]
fn test_parse_relative_weeks() {
    let range = TimeRange::parse_at("2w", date(2024, 3, 15)).unwrap();
    assert_eq!(range.days(), 14);
}

#[test]
fn test_parse_relative_months_uses_calendar() {
    let range = TimeRange::parse_at("1m", date(2024, 3, 15)).unwrap();
    assert_eq!(range.start, date(2024, 2, 16));

    // Clamped to the end of February
    let range = TimeRange::parse_at("1m", date(2024, 3, 31)).unwrap();
    assert_eq!(range.start, date(2024, 3, 1));
}

#[test]
fn test_parse_relative_years() {
    let range = TimeRange::parse_at("1y", date(2024, 3, 15)).unwrap();
    assert_eq!(range.start, date(2023, 3, 16));
    assert_eq!(range.days(), 366);
}

#[test]
fn test_parse_predefined() {
    let today = date(2024, 5, 16); // Thursday

    let range = TimeRange::parse_at("today", today).unwrap();
    assert_eq!((range.start, range.end), (today, today));

    let range = TimeRange::parse_at("yesterday", today).unwrap();
    assert_eq!((range.start, range.end), (date(2024, 5, 15), date(2024, 5, 15)));

    assert_eq!(TimeRange::parse_at("wtd", today).unwrap().start, date(2024, 5, 13));
    assert_eq!(TimeRange::parse_at("mtd", today).unwrap().start, date(2024, 5, 1));
    assert_eq!(TimeRange::parse_at("qtd", today).unwrap().start, date(2024, 4, 1));
    assert_eq!(TimeRange::parse_at("YTD", today).unwrap().start, date(2024, 1, 1));
}

#[test]
fn test_parse_custom() {
    let range = TimeRange::parse_at("2024-01-01, 2024-01-31", date(2025, 1, 1)).unwrap();
    assert_eq!(range.start, date(2024, 1, 1));
    assert_eq!(range.end, date(2024, 1, 31));
    assert_eq!(range.days(), 31);
}

#[test]
fn test_parse_custom_rejects_reversed() {
    let err = TimeRange::parse_at("2024-02-01,2024-01-01", date(2025, 1, 1)).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidTimeRange(_)));
}

#[test]
fn test_parse_invalid() {
    let today = date(2024, 3, 15);
    assert!(TimeRange::parse_at("", today).is_err());
    assert!(TimeRange::parse_at("0d", today).is_err());
    assert!(TimeRange::parse_at("7x", today).is_err());
    assert!(TimeRange::parse_at("forever", today).is_err());
    assert!(TimeRange::parse_at("2024-13-01,2024-12-01", today).is_err());
}

#[test]
fn test_bounds_cover_whole_days() {
    let range = TimeRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
    assert_eq!(range.start_datetime().to_string(), "2024-01-01 00:00:00");
    assert_eq!(range.end_datetime().to_string(), "2024-01-02 23:59:59");
    assert!(range.contains(date(2024, 1, 2).and_hms_opt(23, 0, 0).unwrap()));
    assert!(!range.contains(date(2024, 1, 3).and_hms_opt(0, 0, 0).unwrap()));
    assert_eq!(range.to_string(), "2024-01-01 to 2024-01-02");
}

#[test]
fn test_parse_relative_rejects_counts_beyond_calendar() {
    let today = date(2024, 6, 15);
    for input in ["100000000d", "9223372036854775807d", "2000000000000000000w", "100000000w"] {
        let err = TimeRange::parse_at(input, today).unwrap_err();
        assert!(
            matches!(err, AnalyticsError::InvalidTimeRange(_)),
            "expected InvalidTimeRange for {}",
            input
        );
    }
}

#[test]
fn test_parse_relative_does_not_truncate_month_counts() {
    let today = date(2024, 6, 15);
    for input in ["4294967297m", "3000000000y", "200000000y", "3000000000m"] {
        let err = TimeRange::parse_at(input, today).unwrap_err();
        assert!(
            matches!(err, AnalyticsError::InvalidTimeRange(_)),
            "expected InvalidTimeRange for {}",
            input
        );
    }
}

#[test]
fn test_parse_relative_large_but_valid_counts() {
    let today = date(2024, 6, 15);
    let range = TimeRange::parse_at("100y", today).unwrap();
    assert_eq!(range.start, date(1924, 6, 16));
    let range = TimeRange::parse_at("520w", today).unwrap();
    assert_eq!(range.days(), 3640);
}
