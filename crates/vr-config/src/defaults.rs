//! Centralized missing-value policy for feature construction.
//!
//! Every default the feature layer applies when a record field is absent
//! lives here, so the defaulting policy is auditable and testable in one
//! place instead of being scattered through the feature code.

use serde::{Deserialize, Serialize};

/// Default values substituted for missing record fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDefaults {
    /// Raw distance fraction used when `distance_meters` is absent
    /// (applied before clipping).
    pub distance_fraction: f64,

    /// Raw rating (0-10 scale) used when `rating` is absent.
    pub rating: f64,

    /// Review count used when `review_count` is absent.
    pub review_count: u64,

    /// Affinity used when the category or vibe is unknown.
    pub vibe_match: f64,

    /// Vegetarian signal when `veg_friendly` is absent.
    pub veg: f64,

    /// Open-now signal when `open_now` is absent; 0.5 means "unknown",
    /// which is distinct from closed (0.0).
    pub open: f64,

    /// Completeness when none of the profile flags are present.
    pub completeness: f64,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            distance_fraction: 0.5,
            rating: 5.0,
            review_count: 0,
            vibe_match: 0.5,
            veg: 0.0,
            open: 0.5,
            completeness: 0.5,
        }
    }
}
