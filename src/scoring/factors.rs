use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::listing::{Listing, PropertyType};

const SECONDS_PER_DAY: i64 = 86_400;

const PREMIUM_CITIES: &[&str] = &[
    "vancouver",
    "west vancouver",
    "north vancouver",
    "burnaby",
    "richmond",
    "coquitlam",
    "white rock",
];

const MID_TIER_CITIES: &[&str] = &[
    "surrey",
    "langley",
    "delta",
    "new westminster",
    "port moody",
    "port coquitlam",
    "maple ridge",
];

/// One of the five weighted inputs to a lead score, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    DaysSinceExpiry,
    PriceRange,
    PropertyType,
    OwnerInfo,
    Location,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::DaysSinceExpiry,
        Factor::PriceRange,
        Factor::PropertyType,
        Factor::OwnerInfo,
        Factor::Location,
    ];

    /// Weight out of 100. The five weights sum to exactly 100.
    pub const fn weight(self) -> u8 {
        match self {
            Factor::DaysSinceExpiry => 30,
            Factor::PriceRange => 25,
            Factor::PropertyType => 15,
            Factor::OwnerInfo => 20,
            Factor::Location => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Factor::DaysSinceExpiry => "Days Since Expiry",
            Factor::PriceRange => "Price Range",
            Factor::PropertyType => "Property Type",
            Factor::OwnerInfo => "Owner Information",
            Factor::Location => "Location",
        }
    }
}

/// Desirability tier of a listing's city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityTier {
    Premium,
    Mid,
    Other,
}

impl CityTier {
    /// Case-insensitive substring match; premium cities are checked first.
    pub fn classify(city: &str) -> Self {
        let city = city.to_lowercase();
        if PREMIUM_CITIES.iter().any(|c| city.contains(c)) {
            CityTier::Premium
        } else if MID_TIER_CITIES.iter().any(|c| city.contains(c)) {
            CityTier::Mid
        } else {
            CityTier::Other
        }
    }

    pub fn score(self) -> u8 {
        match self {
            CityTier::Premium => 100,
            CityTier::Mid => 70,
            CityTier::Other => 50,
        }
    }
}

/// Sub-scores for a single listing, each in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreFactors {
    pub days_since_expiry: u8,
    pub price_range: u8,
    pub property_type: u8,
    pub has_owner_info: u8,
    pub location: u8,
}

impl ScoreFactors {
    pub fn get(&self, factor: Factor) -> u8 {
        match factor {
            Factor::DaysSinceExpiry => self.days_since_expiry,
            Factor::PriceRange => self.price_range,
            Factor::PropertyType => self.property_type,
            Factor::OwnerInfo => self.has_owner_info,
            Factor::Location => self.location,
        }
    }
}

/// Compute all five sub-scores for `listing` relative to `now`.
pub fn compute_factors(listing: &Listing, now: DateTime<Utc>) -> ScoreFactors {
    ScoreFactors {
        days_since_expiry: expiry_score(listing.expiry_date.as_deref(), now),
        price_range: price_score(listing.price),
        property_type: property_type_score(listing.property_type),
        has_owner_info: owner_info_score(listing),
        location: location_score(listing.city.as_deref()),
    }
}

/// Recency of expiry. Absent or empty dates score 0; future dates fall in the
/// freshest bucket. Whitespace counts as present (and unreadable).
pub fn expiry_score(expiry_date: Option<&str>, now: DateTime<Utc>) -> u8 {
    let Some(raw) = expiry_date.filter(|s| !s.is_empty()) else {
        return 0;
    };
    match days_since(raw, now) {
        Some(days) => days_bucket(days),
        // An unreadable date fails every threshold
        None => 20,
    }
}

fn days_bucket(days: i64) -> u8 {
    if days <= 3 {
        100
    } else if days <= 7 {
        80
    } else if days <= 14 {
        60
    } else if days <= 30 {
        40
    } else {
        20
    }
}

/// Whole days elapsed between `raw` and `now`, floored. Negative for future dates.
pub fn days_since(raw: &str, now: DateTime<Utc>) -> Option<i64> {
    let expiry = parse_expiry(raw)?;
    Some((now - expiry).num_seconds().div_euclid(SECONDS_PER_DAY))
}

/// Offset-bearing layouts beyond RFC 3339, e.g. Postgres `timestamptz` text ("+00")
const ZONED_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Zone-less layouts, read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date or timestamp. Zone-less values are UTC; date-only values are midnight UTC.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Price tier. Unknown (absent, zero, NaN) scores below the cheapest tier.
pub fn price_score(price: Option<f64>) -> u8 {
    let Some(price) = price.filter(|p| *p != 0.0 && !p.is_nan()) else {
        return 30;
    };
    if price >= 1_000_000.0 {
        100
    } else if price >= 750_000.0 {
        85
    } else if price >= 500_000.0 {
        70
    } else if price >= 300_000.0 {
        55
    } else {
        40
    }
}

pub fn property_type_score(property_type: Option<PropertyType>) -> u8 {
    match property_type {
        Some(PropertyType::House) => 100,
        Some(PropertyType::RowHome) => 85,
        Some(PropertyType::Townhouse) => 75,
        Some(PropertyType::Condo) => 60,
        Some(PropertyType::Mobile) => 40,
        Some(PropertyType::Other) | None => 50,
    }
}

/// Contact completeness: name 40, phone 35, email 25.
pub fn owner_info_score(listing: &Listing) -> u8 {
    let mut score = 0;
    if listing.has_owner_name() {
        score += 40;
    }
    if listing.has_owner_phone() {
        score += 35;
    }
    if listing.has_owner_email() {
        score += 25;
    }
    score
}

pub fn location_score(city: Option<&str>) -> u8 {
    match city {
        Some(city) => CityTier::classify(city).score(),
        None => 50,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> String {
        (now() - Duration::days(days)).to_rfc3339()
    }

    #[test]
    fn test_weights_sum_to_100() {
        let sum: u32 = Factor::ALL.iter().map(|f| f.weight() as u32).sum();
        assert_eq!(sum, 100);
    }

    #[test]
    fn test_expiry_absent_scores_zero() {
        assert_eq!(expiry_score(None, now()), 0);
        assert_eq!(expiry_score(Some(""), now()), 0);
    }

    #[test]
    fn test_expiry_whitespace_is_present_but_unreadable() {
        assert_eq!(expiry_score(Some("  "), now()), 20);
        assert_eq!(expiry_score(Some("\t"), now()), 20);
    }

    #[test]
    fn test_expiry_export_formats_scored_by_recency() {
        // now() is 2024-06-15T12:00Z
        let cases = [
            ("2024-06-14 10:00:00+00", 100),
            ("2024-06-14 10:00:00", 100),
            ("2024-06-14T10:00:00.123", 100),
            ("2024/06/14", 100),
            ("2024-06-10 10:00:00+00", 80),
            ("2024-06-05 10:00:00", 60),
            ("2024-05-25T10:00:00.5", 40),
            ("2024-05-25 10:00:00.250+02", 40),
            ("2024/04/01", 20),
        ];
        for (raw, expected) in cases {
            assert!(parse_expiry(raw).is_some(), "failed to parse {}", raw);
            assert_eq!(expiry_score(Some(raw), now()), expected, "{}", raw);
        }
    }

    #[test]
    fn test_expiry_buckets() {
        assert_eq!(expiry_score(Some(&days_ago(0)), now()), 100);
        assert_eq!(expiry_score(Some(&days_ago(3)), now()), 100);
        assert_eq!(expiry_score(Some(&days_ago(4)), now()), 80);
        assert_eq!(expiry_score(Some(&days_ago(7)), now()), 80);
        assert_eq!(expiry_score(Some(&days_ago(8)), now()), 60);
        assert_eq!(expiry_score(Some(&days_ago(14)), now()), 60);
        assert_eq!(expiry_score(Some(&days_ago(15)), now()), 40);
        assert_eq!(expiry_score(Some(&days_ago(30)), now()), 40);
        assert_eq!(expiry_score(Some(&days_ago(31)), now()), 20);
        assert_eq!(expiry_score(Some(&days_ago(400)), now()), 20);
    }

    #[test]
    fn test_expiry_in_future_scores_100() {
        assert_eq!(expiry_score(Some(&days_ago(-10)), now()), 100);
        assert_eq!(expiry_score(Some("2030-01-01"), now()), 100);
    }

    #[test]
    fn test_expiry_unparseable_scores_lowest_bucket() {
        assert_eq!(expiry_score(Some("last tuesday"), now()), 20);
    }

    #[test]
    fn test_days_since_floors_partial_days() {
        // 2024-06-11 00:00 UTC is 4.5 days before now()
        assert_eq!(days_since("2024-06-11", now()), Some(4));
        // Half a day in the future floors to -1
        assert_eq!(days_since("2024-06-16", now()), Some(-1));
    }

    #[test]
    fn test_parse_expiry_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_expiry("2024-03-01"), Some(midnight));
        assert_eq!(parse_expiry("2024-03-01T00:00:00"), Some(midnight));
        assert_eq!(parse_expiry("2024-03-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_expiry("2024-03-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_expiry("2024-03-01 00:00:00"), Some(midnight));
        assert_eq!(parse_expiry("2024-03-01 00:00:00.000"), Some(midnight));
        assert_eq!(parse_expiry("2024-03-01 02:00:00+02"), Some(midnight));
        assert_eq!(parse_expiry("2024-03-01T02:00:00+0200"), Some(midnight));
        assert_eq!(parse_expiry("2024/03/01"), Some(midnight));
        assert_eq!(parse_expiry("03/01/2024"), None);
    }

    #[test]
    fn test_price_tiers() {
        assert_eq!(price_score(Some(1_000_000.0)), 100);
        assert_eq!(price_score(Some(999_999.0)), 85);
        assert_eq!(price_score(Some(750_000.0)), 85);
        assert_eq!(price_score(Some(500_000.0)), 70);
        assert_eq!(price_score(Some(300_000.0)), 55);
        assert_eq!(price_score(Some(299_999.0)), 40);
        assert_eq!(price_score(Some(1.0)), 40);
    }

    #[test]
    fn test_price_unknown_defaults() {
        assert_eq!(price_score(None), 30);
        assert_eq!(price_score(Some(0.0)), 30);
        assert_eq!(price_score(Some(f64::NAN)), 30);
    }

    #[test]
    fn test_price_infinite_is_present() {
        assert_eq!(price_score(Some(f64::INFINITY)), 100);
        assert_eq!(price_score(Some(f64::NEG_INFINITY)), 40);
    }

    #[test]
    fn test_price_monotonic_across_tiers() {
        let prices = [
            1.0, 299_999.0, 300_000.0, 499_999.0, 500_000.0, 749_999.0, 750_000.0, 999_999.0,
            1_000_000.0, 5_000_000.0,
        ];
        let scores: Vec<u8> = prices.iter().map(|p| price_score(Some(*p))).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{:?}", scores);
    }

    #[test]
    fn test_property_type_table() {
        assert_eq!(property_type_score(Some(PropertyType::House)), 100);
        assert_eq!(property_type_score(Some(PropertyType::RowHome)), 85);
        assert_eq!(property_type_score(Some(PropertyType::Townhouse)), 75);
        assert_eq!(property_type_score(Some(PropertyType::Condo)), 60);
        assert_eq!(property_type_score(Some(PropertyType::Mobile)), 40);
        assert_eq!(property_type_score(Some(PropertyType::Other)), 50);
        assert_eq!(property_type_score(None), 50);
    }

    #[test]
    fn test_owner_info_additive() {
        let blank = Listing {
            owner_name: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(owner_info_score(&blank), 40);

        let mut listing = Listing {
            owner_phone: Some("604-555-0100".to_string()),
            ..Default::default()
        };
        assert_eq!(owner_info_score(&listing), 35);

        listing.owner_email = Some("owner@example.com".to_string());
        assert_eq!(owner_info_score(&listing), 60);

        listing.owner_name = Some("Pat Lee".to_string());
        assert_eq!(owner_info_score(&listing), 100);
    }

    #[test]
    fn test_city_case_insensitive_substring() {
        assert_eq!(location_score(Some("NORTH VANCOUVER")), 100);
        assert_eq!(location_score(Some("north vancouver bc")), 100);
        assert_eq!(location_score(Some("Port Moody")), 70);
        assert_eq!(location_score(Some("Kelowna")), 50);
        assert_eq!(location_score(None), 50);
    }

    #[test]
    fn test_premium_checked_before_mid_tier() {
        // "port coquitlam" contains "coquitlam", which is premium
        assert_eq!(CityTier::classify("Port Coquitlam"), CityTier::Premium);
    }

    #[test]
    fn test_compute_factors_empty_listing() {
        let factors = compute_factors(&Listing::default(), now());
        assert_eq!(
            factors,
            ScoreFactors {
                days_since_expiry: 0,
                price_range: 30,
                property_type: 50,
                has_owner_info: 0,
                location: 50,
            }
        );
    }
}
