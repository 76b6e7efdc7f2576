//! Versioned venue input record.
//!
//! All quality signals are optional; missing values are resolved by the
//! feature layer against the centralized default table, never here. Unknown
//! attributes from upstream providers land in the `extra` side-channel map
//! instead of being merged into the typed schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single candidate venue as supplied by the caller.
///
/// Immutable input; the engine never mutates records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    /// Caller-assigned identifier, propagated unchanged into results.
    pub id: String,

    /// Category label (e.g. "cafe", "restaurant"), looked up in the
    /// vibe-affinity table.
    #[serde(default)]
    pub category: Option<String>,

    /// Distance from the query point in meters.
    #[serde(default)]
    pub distance_meters: Option<f64>,

    /// Rating on a 0-10 scale.
    #[serde(default)]
    pub rating: Option<f64>,

    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: Option<u64>,

    /// Whether the venue is open right now. `None` means unknown, which is
    /// distinct from closed.
    #[serde(default)]
    pub open_now: Option<bool>,

    /// Whether the venue is vegetarian-friendly.
    #[serde(default)]
    pub veg_friendly: Option<bool>,

    /// Profile-completeness flags.
    #[serde(default)]
    pub has_address: Option<bool>,
    #[serde(default)]
    pub has_phone: Option<bool>,
    #[serde(default)]
    pub has_website: Option<bool>,
    #[serde(default)]
    pub has_hours: Option<bool>,

    /// Unknown upstream attributes, preserved verbatim but never interpreted.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VenueRecord {
    /// Minimal record with only an identifier; every signal missing.
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: None,
            distance_meters: None,
            rating: None,
            review_count: None,
            open_now: None,
            veg_friendly: None,
            has_address: None,
            has_phone: None,
            has_website: None,
            has_hours: None,
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_record_has_no_signals() {
        let r = VenueRecord::bare("v1");
        assert_eq!(r.id, "v1");
        assert!(r.rating.is_none());
        assert!(r.extra.is_empty());
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let json = r#"{
            "id": "v2",
            "rating": 8.4,
            "fsq_chain_id": "abc123",
            "popularity": 0.92
        }"#;
        let r: VenueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.rating, Some(8.4));
        assert_eq!(r.extra.len(), 2);
        assert!(r.extra.contains_key("fsq_chain_id"));
    }

    #[test]
    fn serde_roundtrip() {
        let mut r = VenueRecord::bare("v3");
        r.category = Some("cafe".into());
        r.distance_meters = Some(742.0);
        r.open_now = Some(true);
        let json = serde_json::to_string(&r).unwrap();
        let back: VenueRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
