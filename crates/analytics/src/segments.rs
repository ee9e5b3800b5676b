//! Classification rules
//!
//! Customer value segments, purchase frequency bands and discount buckets.
//! Thresholds are inclusive lower bounds (segments) or inclusive upper
//! bounds (discounts), evaluated in order with the first match winning.

use serde::{Deserialize, Serialize};

/// Minimum total spend for a high value customer
pub const HIGH_VALUE_MIN_SPEND: f64 = 500.0;
/// Minimum total spend for a medium value customer
pub const MEDIUM_VALUE_MIN_SPEND: f64 = 200.0;
/// Minimum purchase count for a frequent customer
pub const FREQUENT_MIN_PURCHASES: i64 = 10;
/// Minimum purchase count for a regular customer
pub const REGULAR_MIN_PURCHASES: i64 = 5;

/// Customer value segment, by total spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum CustomerSegment {
    #[serde(rename = "High Value")]
    HighValue,
    #[serde(rename = "Medium Value")]
    MediumValue,
    #[default]
    #[serde(rename = "Low Value")]
    LowValue,
}

impl CustomerSegment {
    pub fn classify(total_spent: f64) -> Self {
        if total_spent >= HIGH_VALUE_MIN_SPEND {
            Self::HighValue
        } else if total_spent >= MEDIUM_VALUE_MIN_SPEND {
            Self::MediumValue
        } else {
            Self::LowValue
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighValue => "High Value",
            Self::MediumValue => "Medium Value",
            Self::LowValue => "Low Value",
        }
    }
}

impl std::fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase frequency band, by number of purchases
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PurchaseFrequency {
    Frequent,
    Regular,
    #[default]
    Occasional,
}

impl PurchaseFrequency {
    pub fn classify(total_purchases: i64) -> Self {
        if total_purchases >= FREQUENT_MIN_PURCHASES {
            Self::Frequent
        } else if total_purchases >= REGULAR_MIN_PURCHASES {
            Self::Regular
        } else {
            Self::Occasional
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frequent => "Frequent",
            Self::Regular => "Regular",
            Self::Occasional => "Occasional",
        }
    }
}

impl std::fmt::Display for PurchaseFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discount bucket
///
/// Variants are declared in severity order; `Ord` and [`DiscountRange::ordinal`]
/// follow it, so reports sort by severity rather than by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiscountRange {
    #[serde(rename = "No Discount")]
    NoDiscount,
    #[serde(rename = "1-5%")]
    UpTo5,
    #[serde(rename = "6-10%")]
    UpTo10,
    #[serde(rename = "11-15%")]
    UpTo15,
    #[serde(rename = "16-20%")]
    UpTo20,
    #[serde(rename = "More than 20%")]
    Over20,
}

impl DiscountRange {
    /// Every bucket, in severity order
    pub const ALL: [DiscountRange; 6] = [
        Self::NoDiscount,
        Self::UpTo5,
        Self::UpTo10,
        Self::UpTo15,
        Self::UpTo20,
        Self::Over20,
    ];

    /// Inclusive upper bound of the bucket; `None` for the open-ended last one
    ///
    /// `NoDiscount` matches only an exact zero.
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            Self::NoDiscount => Some(0.0),
            Self::UpTo5 => Some(0.05),
            Self::UpTo10 => Some(0.10),
            Self::UpTo15 => Some(0.15),
            Self::UpTo20 => Some(0.20),
            Self::Over20 => None,
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoDiscount => "No Discount",
            Self::UpTo5 => "1-5%",
            Self::UpTo10 => "6-10%",
            Self::UpTo15 => "11-15%",
            Self::UpTo20 => "16-20%",
            Self::Over20 => "More than 20%",
        }
    }

    /// Bucket for a discount fraction; exactly one bucket matches any value
    pub fn classify(discount: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|range| range.matches(discount))
            .unwrap_or(Self::Over20)
    }

    fn matches(&self, discount: f64) -> bool {
        match (self, self.upper_bound()) {
            (Self::NoDiscount, _) => discount == 0.0,
            (_, Some(bound)) => discount <= bound,
            (_, None) => true,
        }
    }

    /// SQL `CASE` mapping `column` to the bucket label
    pub fn sql_label_case(column: &str) -> String {
        Self::sql_case(column, |range| format!("'{}'", range.label()))
    }

    /// SQL `CASE` mapping `column` to the bucket ordinal
    pub fn sql_ordinal_case(column: &str) -> String {
        Self::sql_case(column, |range| range.ordinal().to_string())
    }

    fn sql_case(column: &str, value: impl Fn(DiscountRange) -> String) -> String {
        let mut sql = String::from("CASE");
        for range in Self::ALL {
            match (range, range.upper_bound()) {
                (Self::NoDiscount, _) => {
                    sql.push_str(&format!(" WHEN {} = 0 THEN {}", column, value(range)))
                }
                (_, Some(bound)) => sql.push_str(&format!(
                    " WHEN {} <= {:?} THEN {}",
                    column,
                    bound,
                    value(range)
                )),
                (_, None) => sql.push_str(&format!(" ELSE {}", value(range))),
            }
        }
        sql.push_str(" END");
        sql
    }
}

impl std::fmt::Display for DiscountRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_segment_boundaries() {
        assert_eq!(CustomerSegment::classify(500.00), CustomerSegment::HighValue);
        assert_eq!(CustomerSegment::classify(499.99), CustomerSegment::MediumValue);
        assert_eq!(CustomerSegment::classify(200.00), CustomerSegment::MediumValue);
        assert_eq!(CustomerSegment::classify(199.99), CustomerSegment::LowValue);
        assert_eq!(CustomerSegment::classify(0.0), CustomerSegment::LowValue);
    }

    #[test]
    fn test_purchase_frequency_boundaries() {
        assert_eq!(PurchaseFrequency::classify(10), PurchaseFrequency::Frequent);
        assert_eq!(PurchaseFrequency::classify(9), PurchaseFrequency::Regular);
        assert_eq!(PurchaseFrequency::classify(5), PurchaseFrequency::Regular);
        assert_eq!(PurchaseFrequency::classify(4), PurchaseFrequency::Occasional);
        assert_eq!(PurchaseFrequency::classify(0), PurchaseFrequency::Occasional);
    }

    #[test]
    fn test_discount_boundaries_are_inclusive() {
        assert_eq!(DiscountRange::classify(0.0), DiscountRange::NoDiscount);
        assert_eq!(DiscountRange::classify(0.01), DiscountRange::UpTo5);
        assert_eq!(DiscountRange::classify(0.05), DiscountRange::UpTo5);
        assert_eq!(DiscountRange::classify(0.051), DiscountRange::UpTo10);
        assert_eq!(DiscountRange::classify(0.10), DiscountRange::UpTo10);
        assert_eq!(DiscountRange::classify(0.15), DiscountRange::UpTo15);
        assert_eq!(DiscountRange::classify(0.20), DiscountRange::UpTo20);
        assert_eq!(DiscountRange::classify(0.2001), DiscountRange::Over20);
        assert_eq!(DiscountRange::classify(1.0), DiscountRange::Over20);
    }

    #[test]
    fn test_classified_bucket_brackets_value() {
        for step in 0..=100 {
            let d = step as f64 / 100.0;
            let range = DiscountRange::classify(d);
            if let Some(bound) = range.upper_bound() {
                assert!(d <= bound, "discount {} above {}", d, range);
            }
            if let Some(prev) = (range.ordinal() as usize)
                .checked_sub(1)
                .map(|idx| DiscountRange::ALL[idx])
            {
                let lower = prev.upper_bound().unwrap();
                assert!(d > lower, "discount {} belongs below {}", d, range);
            }
        }
    }

    #[test]
    fn test_ordinals_follow_severity() {
        let ordinals: Vec<u8> = DiscountRange::ALL.iter().map(|r| r.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3, 4, 5]);
        assert!(DiscountRange::NoDiscount < DiscountRange::Over20);
    }

    #[test]
    fn test_sql_label_case() {
        assert_eq!(
            DiscountRange::sql_label_case("s.discount"),
            "CASE WHEN s.discount = 0 THEN 'No Discount' \
             WHEN s.discount <= 0.05 THEN '1-5%' \
             WHEN s.discount <= 0.1 THEN '6-10%' \
             WHEN s.discount <= 0.15 THEN '11-15%' \
             WHEN s.discount <= 0.2 THEN '16-20%' \
             ELSE 'More than 20%' END"
        );
    }

    #[test]
    fn test_sql_ordinal_case() {
        let sql = DiscountRange::sql_ordinal_case("d");
        assert!(sql.starts_with("CASE WHEN d = 0 THEN 0 WHEN d <= 0.05 THEN 1"));
        assert!(sql.ends_with("ELSE 5 END"));
    }

    #[test]
    fn test_labels_round_trip_through_serde() {
        for range in DiscountRange::ALL {
            let json = serde_json::to_string(&range).unwrap();
            assert_eq!(json, format!("\"{}\"", range.label()));
            let back: DiscountRange = serde_json::from_str(&json).unwrap();
            assert_eq!(back, range);
        }
        let segment: CustomerSegment = serde_json::from_str("\"Medium Value\"").unwrap();
        assert_eq!(segment, CustomerSegment::MediumValue);
    }
}
