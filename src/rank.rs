use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::listing::Listing;
use crate::scoring::{
    factors::days_since, score_listing, validate_listing, Clock, ScoreLabel, ScoreResult,
};

/// A listing paired with its score, label and breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredListing {
    pub listing: Listing,
    #[serde(flatten)]
    pub result: ScoreResult,
    #[serde(skip)]
    pub days_since_expiry: Option<i64>,
}

impl ScoredListing {
    pub fn new(listing: Listing, now: DateTime<Utc>) -> Self {
        let result = score_listing(&listing, now);
        let days_since_expiry = listing
            .expiry_date
            .as_deref()
            .and_then(|raw| days_since(raw, now));
        Self {
            listing,
            result,
            days_since_expiry,
        }
    }
}

/// Score every listing against one reading of `clock`, drop those labelled
/// below `min_label`, and sort.
///
/// Order: score descending, then most recently expired first (unknown expiry
/// last), then input order.
pub fn rank_listings(
    listings: Vec<Listing>,
    clock: &dyn Clock,
    min_label: Option<ScoreLabel>,
) -> Vec<ScoredListing> {
    let now = clock.now();
    let total = listings.len();
    debug!(as_of = %now, total, "ranking listings");

    let mut scored: Vec<ScoredListing> = listings
        .into_iter()
        .inspect(|listing| {
            if let Err(issues) = validate_listing(listing, now) {
                for issue in issues {
                    warn!(listing = %listing.display_name(), "{}", issue);
                }
            }
        })
        .map(|listing| ScoredListing::new(listing, now))
        .filter(|scored| min_label.map_or(true, |min| scored.result.label >= min))
        .collect();

    if let Some(min) = min_label {
        debug!(kept = scored.len(), total, min_label = %min, "label filter applied");
    }

    scored.sort_by(compare_ranked);
    scored
}

fn compare_ranked(a: &ScoredListing, b: &ScoredListing) -> Ordering {
    // Primary: score descending
    b.result
        .score
        .cmp(&a.result.score)
        // Tie-breaker: fresher expiry first, unknown last
        .then_with(|| match (a.days_since_expiry, b.days_since_expiry) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}
