use chrono::{DateTime, Utc};

use super::factors::parse_expiry;
use crate::listing::{Listing, PropertyType};

/// Check a listing for data-quality problems that silently fall back to
/// default sub-scores. Returns all issues at once (not just the first).
///
/// Issues never change the score; callers surface them as warnings.
pub fn validate_listing(listing: &Listing, now: DateTime<Utc>) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref raw) = listing.expiry_date {
        if !raw.is_empty() {
            match parse_expiry(raw) {
                None => errors.push(format!("expiry_date: unrecognized date '{}'", raw)),
                Some(expiry) if expiry > now => {
                    errors.push(format!("expiry_date: '{}' is in the future", raw))
                }
                Some(_) => {}
            }
        }
    }

    if let Some(price) = listing.price {
        if !price.is_finite() {
            errors.push("price: not a finite number".to_string());
        } else if price < 0.0 {
            errors.push(format!("price: must be positive, got {}", price));
        } else if price == 0.0 {
            errors.push("price: zero is treated as unknown".to_string());
        }
    }

    if listing.property_type == Some(PropertyType::Other) {
        errors.push("property_type: unrecognized value".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
