use serde::{Deserialize, Deserializer, Serialize};

/// Property classification as recorded on a listing.
///
/// Anything the data store sends that is not one of the known kinds
/// deserializes to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    RowHome,
    Townhouse,
    Condo,
    Mobile,
    #[serde(other)]
    Other,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::RowHome => "row_home",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Condo => "condo",
            PropertyType::Mobile => "mobile",
            PropertyType::Other => "other",
        }
    }
}

/// A listing as seen by the scoring engine.
///
/// Every field is optional: exports from the listing store routinely omit
/// columns, and the engine degrades each missing field to a default sub-score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Date the listing's exclusivity period ended ("2024-03-01" or RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Score persisted by a previous export; never read by the engine.
    /// Unreadable or out-of-range values load as `None`.
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<u8>,
}

impl Listing {
    /// Short human label: address, then city, then id
    pub fn display_name(&self) -> String {
        match (non_empty(&self.address), non_empty(&self.city)) {
            (Some(address), Some(city)) => format!("{}, {}", address, city),
            (Some(address), None) => address.to_string(),
            (None, Some(city)) => city.to_string(),
            (None, None) => non_empty(&self.id)
                .map(|id| format!("#{}", id))
                .unwrap_or_else(|| "(unnamed listing)".to_string()),
        }
    }

    pub fn has_owner_name(&self) -> bool {
        present(&self.owner_name)
    }

    pub fn has_owner_phone(&self) -> bool {
        present(&self.owner_phone)
    }

    pub fn has_owner_email(&self) -> bool {
        present(&self.owner_email)
    }
}

/// Set and non-empty. Whitespace counts as present.
fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Trimmed and non-empty, for display
fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedScore {
    Number(f64),
    Text(String),
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<PersistedScore>::deserialize(deserializer).unwrap_or(None);
    let value = match raw {
        Some(PersistedScore::Number(v)) => Some(v),
        Some(PersistedScore::Text(t)) => t.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(value
        .filter(|v| (0.0..=100.0).contains(v))
        .map(|v| v.round() as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object() {
        let listing: Listing = serde_json::from_str("{}").unwrap();
        assert_eq!(listing, Listing::default());
    }

    #[test]
    fn test_parse_null_fields() {
        let json = r#"{"price": null, "property_type": null, "city": null}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.price.is_none());
        assert!(listing.property_type.is_none());
        assert!(listing.city.is_none());
    }

    #[test]
    fn test_parse_property_types() {
        let json = r#"[
            {"property_type": "house"},
            {"property_type": "row_home"},
            {"property_type": "townhouse"},
            {"property_type": "condo"},
            {"property_type": "mobile"}
        ]"#;
        let listings: Vec<Listing> = serde_json::from_str(json).unwrap();
        let types: Vec<_> = listings.iter().map(|l| l.property_type).collect();
        assert_eq!(
            types,
            vec![
                Some(PropertyType::House),
                Some(PropertyType::RowHome),
                Some(PropertyType::Townhouse),
                Some(PropertyType::Condo),
                Some(PropertyType::Mobile),
            ]
        );
    }

    #[test]
    fn test_unknown_property_type_is_other() {
        let listing: Listing = serde_json::from_str(r#"{"property_type": "duplex"}"#).unwrap();
        assert_eq!(listing.property_type, Some(PropertyType::Other));
    }

    #[test]
    fn test_owner_presence() {
        let listing = Listing {
            owner_name: Some("   ".to_string()),
            owner_phone: Some(String::new()),
            owner_email: Some("jane@example.com".to_string()),
            ..Default::default()
        };
        // Whitespace is non-empty, so it counts
        assert!(listing.has_owner_name());
        assert!(!listing.has_owner_phone());
        assert!(listing.has_owner_email());
        assert!(!Listing::default().has_owner_name());
    }

    #[test]
    fn test_persisted_score_is_lenient() {
        let json = r#"[
            {"score": 72},
            {"score": 72.5},
            {"score": "64"},
            {"score": 300},
            {"score": -4},
            {"score": "n/a"},
            {"score": null},
            {"city": "Delta"}
        ]"#;
        let listings: Vec<Listing> = serde_json::from_str(json).unwrap();
        let scores: Vec<_> = listings.iter().map(|l| l.score).collect();
        assert_eq!(
            scores,
            vec![Some(72), Some(73), Some(64), None, None, None, None, None]
        );
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut listing = Listing {
            address: Some("12 Oak St".to_string()),
            city: Some("Burnaby".to_string()),
            ..Default::default()
        };
        assert_eq!(listing.display_name(), "12 Oak St, Burnaby");

        listing.address = None;
        assert_eq!(listing.display_name(), "Burnaby");

        listing.city = None;
        listing.id = Some("L-7".to_string());
        assert_eq!(listing.display_name(), "#L-7");

        listing.id = None;
        assert_eq!(listing.display_name(), "(unnamed listing)");
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let listing = Listing {
            city: Some("Delta".to_string()),
            score: Some(55),
            ..Default::default()
        };
        let json = serde_json::to_string(&listing).unwrap();
        assert_eq!(json, r#"{"city":"Delta","score":55}"#);
    }
}
