//! Time range parsing
//!
//! Supports predefined ranges (today, ytd), relative ranges (7d, 4w, 3m, 1y)
//! and custom date ranges. Ranges are whole calendar days, both ends inclusive.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{AnalyticsError, Result};

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl TimeRange {
    /// Create a new time range
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(AnalyticsError::InvalidTimeRange(format!(
                "end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a time range string relative to the local date
    ///
    /// Supported formats:
    /// - Predefined: `today`, `yesterday`, `wtd`, `mtd`, `qtd`, `ytd`
    /// - Relative: `7d`, `4w`, `3m`, `1y` (calendar months/years, ending today)
    /// - Custom: `2024-01-01,2024-01-31`
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_at(s, Local::now().date_naive())
    }

    /// Parse a time range string relative to `today`
    pub fn parse_at(s: &str, today: NaiveDate) -> Result<Self> {
        let s = s.trim().to_lowercase();

        if let Some(range) = Self::parse_predefined(&s, today) {
            return Ok(range);
        }

        if let Some(range) = Self::parse_relative(&s, today)? {
            return Ok(range);
        }

        if let Some(range) = Self::parse_custom(&s)? {
            return Ok(range);
        }

        Err(AnalyticsError::InvalidTimeRange(format!(
            "unknown time range format: {}",
            s
        )))
    }

    /// Number of calendar days covered, both endpoints included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// First instant of the range
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Last whole second of the range
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.end.and_time(NaiveTime::MIN))
    }

    /// Whether a timestamp falls inside the range
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        (self.start..=self.end).contains(&ts.date())
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl TimeRange {
    fn parse_predefined(s: &str, today: NaiveDate) -> Option<Self> {
        let start = match s {
            "today" => today,
            "yesterday" => {
                let day = today - Duration::days(1);
                return Some(Self { start: day, end: day });
            }
            "wtd" => today - Duration::days(today.weekday().num_days_from_monday() as i64),
            "mtd" => today.with_day(1)?,
            "qtd" => {
                let quarter_start_month = ((today.month() - 1) / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), quarter_start_month, 1)?
            }
            "ytd" => NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
            _ => return None,
        };
        Some(Self { start, end: today })
    }

    fn parse_relative(s: &str, today: NaiveDate) -> Result<Option<Self>> {
        let Some((num, unit)) = extract_num_unit(s) else {
            return Ok(None);
        };

        // 7d means today plus the 6 previous days
        let start = match unit {
            'd' => days_back(today, Some(num)),
            'w' => days_back(today, num.checked_mul(7)),
            'm' => months_back(today, i32::try_from(num).ok()),
            'y' => months_back(
                today,
                i32::try_from(num).ok().and_then(|n| n.checked_mul(12)),
            ),
            _ => return Ok(None),
        };

        match start {
            Some(start) => Ok(Some(Self { start, end: today })),
            None => Err(AnalyticsError::InvalidTimeRange(format!(
                "{} reaches outside the supported calendar",
                s
            ))),
        }
    }

    fn parse_custom(s: &str) -> Result<Option<Self>> {
        let Some((start, end)) = s.split_once(',') else {
            return Ok(None);
        };

        let start = parse_date(start.trim())?;
        let end = parse_date(end.trim())?;
        Self::new(start, end).map(Some)
    }
}

fn extract_num_unit(s: &str) -> Option<(i64, char)> {
    let unit = s.chars().last()?;
    if !unit.is_ascii_alphabetic() {
        return None;
    }

    let num: i64 = s[..s.len() - unit.len_utf8()].parse().ok()?;
    if num <= 0 {
        return None;
    }

    Some((num, unit))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        AnalyticsError::InvalidTimeRange(format!("invalid date format: {} (use YYYY-MM-DD)", s))
    })
}

/// Start of a range covering `days` days that ends on `today`
fn days_back(today: NaiveDate, days: Option<i64>) -> Option<NaiveDate> {
    let offset = Duration::try_days(days? - 1)?;
    today.checked_sub_signed(offset)
}

/// Day after the date `months` calendar months before `today`
fn months_back(today: NaiveDate, months: Option<i32>) -> Option<NaiveDate> {
    shift_months(today, months?.checked_neg()?)?.succ_opt()
}

/// Shift a date by whole months, clamping to the last day of the target month
fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = (date.year().checked_mul(12)? + date.month0() as i32).checked_add(months)?;
    let (year, month) = (total.div_euclid(12), total.rem_euclid(12) as u32 + 1);

    (1..=date.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
}
