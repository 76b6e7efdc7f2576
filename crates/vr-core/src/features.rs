//! Feature construction.
//!
//! Maps raw venue records plus user context into fixed-order numeric
//! feature vectors. The order (see [`vr_common::FEATURE_NAMES`]) is a
//! system-wide invariant: it defines what each coefficient and covariance
//! entry means. Missing fields resolve against the centralized
//! [`FeatureDefaults`] table; nothing here invents its own default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vr_common::{VenueRecord, FEATURE_COUNT, FEATURE_NAMES};
use vr_config::{AffinityTable, FeatureDefaults};
use vr_math::clip;

/// Distance cap in meters; anything at or beyond normalizes to 1.0.
pub const MAX_DISTANCE_M: f64 = 3000.0;

/// Rating scale ceiling (Foursquare-style 0-10 ratings).
pub const MAX_RATING: f64 = 10.0;

/// Down-weight applied to the vegetarian signal when the user did not ask
/// for vegetarian venues. Asymmetric by design: the signal is damped, not
/// zeroed.
pub const VEG_DOWNWEIGHT: f64 = 0.3;

/// One feature vector in canonical order, intercept first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Named view of the values, for diagnostics.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        FEATURE_NAMES
            .iter()
            .zip(self.values)
            .map(|(name, v)| ((*name).to_string(), v))
            .collect()
    }
}

/// Builds feature vectors from raw records.
#[derive(Debug, Clone)]
pub struct FeatureEngineer {
    affinity: AffinityTable,
    defaults: FeatureDefaults,
}

impl Default for FeatureEngineer {
    fn default() -> Self {
        Self::new(AffinityTable::default(), FeatureDefaults::default())
    }
}

impl FeatureEngineer {
    pub fn new(affinity: AffinityTable, defaults: FeatureDefaults) -> Self {
        Self { affinity, defaults }
    }

    /// One feature vector per record, in input order. Pure function of its
    /// inputs; records are never mutated.
    pub fn prepare(
        &self,
        records: &[VenueRecord],
        vibe: &str,
        user_wants_veg: bool,
    ) -> Vec<FeatureVector> {
        records
            .iter()
            .map(|r| self.prepare_one(r, vibe, user_wants_veg))
            .collect()
    }

    fn prepare_one(&self, record: &VenueRecord, vibe: &str, user_wants_veg: bool) -> FeatureVector {
        let d = &self.defaults;

        let distance_norm = match record.distance_meters {
            Some(m) => clip(m / MAX_DISTANCE_M, 0.0, 1.0),
            None => clip(d.distance_fraction, 0.0, 1.0),
        };

        let rating_norm = record.rating.unwrap_or(d.rating) / MAX_RATING;

        let reviews = record.review_count.unwrap_or(d.review_count) as f64;
        let log_reviews = (1.0 + reviews).ln() / 1000f64.ln();

        let vibe_match = match &record.category {
            Some(cat) => self.affinity.score(vibe, cat),
            None => d.vibe_match,
        };

        let mut is_veg = match record.veg_friendly {
            Some(v) => {
                if v {
                    1.0
                } else {
                    0.0
                }
            }
            None => d.veg,
        };
        if !user_wants_veg {
            is_veg *= VEG_DOWNWEIGHT;
        }

        let is_open = match record.open_now {
            Some(true) => 1.0,
            Some(false) => 0.0,
            None => d.open,
        };

        let completeness = completeness_fraction(record).unwrap_or(d.completeness);

        FeatureVector::new([
            1.0, // intercept
            distance_norm,
            rating_norm,
            log_reviews,
            vibe_match,
            is_veg,
            is_open,
            completeness,
        ])
    }
}

/// Fraction of present profile flags that are true; `None` when no flag is
/// present at all.
fn completeness_fraction(record: &VenueRecord) -> Option<f64> {
    let flags = [
        record.has_address,
        record.has_phone,
        record.has_website,
        record.has_hours,
    ];
    let present: Vec<bool> = flags.iter().filter_map(|f| *f).collect();
    if present.is_empty() {
        return None;
    }
    let set = present.iter().filter(|b| **b).count();
    Some(set as f64 / present.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engineer() -> FeatureEngineer {
        FeatureEngineer::default()
    }

    fn prepare_one(record: VenueRecord, vibe: &str, veg: bool) -> FeatureVector {
        engineer().prepare(&[record], vibe, veg)[0]
    }

    fn feature(v: &FeatureVector, name: &str) -> f64 {
        let idx = FEATURE_NAMES.iter().position(|n| *n == name).unwrap();
        v.as_slice()[idx]
    }

    #[test]
    fn intercept_is_always_one() {
        let v = prepare_one(VenueRecord::bare("v"), "work", false);
        assert_eq!(feature(&v, "intercept"), 1.0);
    }

    #[test]
    fn distance_clips_at_cap() {
        let mut r = VenueRecord::bare("v");
        r.distance_meters = Some(4500.0);
        let v = prepare_one(r, "work", false);
        assert_eq!(feature(&v, "distance_norm"), 1.0);
    }

    #[test]
    fn distance_clips_at_zero() {
        let mut r = VenueRecord::bare("v");
        r.distance_meters = Some(-10.0);
        let v = prepare_one(r, "work", false);
        assert_eq!(feature(&v, "distance_norm"), 0.0);
    }

    #[test]
    fn distance_normalizes_linearly() {
        let mut r = VenueRecord::bare("v");
        r.distance_meters = Some(1500.0);
        let v = prepare_one(r, "work", false);
        assert!((feature(&v, "distance_norm") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn missing_distance_uses_default() {
        let v = prepare_one(VenueRecord::bare("v"), "work", false);
        assert!((feature(&v, "distance_norm") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rating_divides_by_ten_and_defaults_to_midscale() {
        let mut r = VenueRecord::bare("v");
        r.rating = Some(8.4);
        let v = prepare_one(r, "work", false);
        assert!((feature(&v, "rating_norm") - 0.84).abs() < 1e-12);

        let v = prepare_one(VenueRecord::bare("v"), "work", false);
        assert!((feature(&v, "rating_norm") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn log_reviews_scale() {
        let mut r = VenueRecord::bare("v");
        r.review_count = Some(999);
        let v = prepare_one(r, "work", false);
        assert!((feature(&v, "log_reviews") - 1.0).abs() < 1e-12);

        let mut r = VenueRecord::bare("v");
        r.review_count = Some(0);
        let v = prepare_one(r, "work", false);
        assert_eq!(feature(&v, "log_reviews"), 0.0);
    }

    #[test]
    fn vibe_match_uses_affinity_table() {
        let mut r = VenueRecord::bare("v");
        r.category = Some("cafe".into());
        let v = prepare_one(r, "work", false);
        assert!((feature(&v, "vibe_match") - 0.95).abs() < 1e-12);
    }

    #[test]
    fn unknown_vibe_or_category_is_neutral() {
        let mut r = VenueRecord::bare("v");
        r.category = Some("laundromat".into());
        let v = prepare_one(r, "work", false);
        assert!((feature(&v, "vibe_match") - 0.5).abs() < 1e-12);

        let mut r = VenueRecord::bare("v");
        r.category = Some("cafe".into());
        let v = prepare_one(r, "sleepy", false);
        assert!((feature(&v, "vibe_match") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn veg_downweighted_when_not_requested() {
        let mut r = VenueRecord::bare("v");
        r.veg_friendly = Some(true);
        let v = prepare_one(r.clone(), "work", false);
        assert!((feature(&v, "is_veg") - VEG_DOWNWEIGHT).abs() < 1e-12);

        let v = prepare_one(r, "work", true);
        assert!((feature(&v, "is_veg") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_veg_is_zero_even_downweighted() {
        let v = prepare_one(VenueRecord::bare("v"), "work", false);
        assert_eq!(feature(&v, "is_veg"), 0.0);
    }

    #[test]
    fn open_unknown_differs_from_closed() {
        let mut r = VenueRecord::bare("v");
        r.open_now = Some(false);
        let closed = prepare_one(r, "work", false);
        let unknown = prepare_one(VenueRecord::bare("v"), "work", false);
        assert_eq!(feature(&closed, "is_open"), 0.0);
        assert!((feature(&unknown, "is_open") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn completeness_averages_present_flags_only() {
        let mut r = VenueRecord::bare("v");
        r.has_address = Some(true);
        r.has_phone = Some(false);
        // website/hours absent from the record entirely.
        let v = prepare_one(r, "work", false);
        assert!((feature(&v, "completeness") - 0.5).abs() < 1e-12);

        let mut r = VenueRecord::bare("v");
        r.has_address = Some(true);
        r.has_phone = Some(true);
        r.has_website = Some(true);
        r.has_hours = Some(false);
        let v = prepare_one(r, "work", false);
        assert!((feature(&v, "completeness") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn completeness_defaults_when_no_flags_present() {
        let v = prepare_one(VenueRecord::bare("v"), "work", false);
        assert!((feature(&v, "completeness") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn output_order_matches_input_order() {
        let mut a = VenueRecord::bare("a");
        a.rating = Some(9.0);
        let mut b = VenueRecord::bare("b");
        b.rating = Some(2.0);
        let vs = engineer().prepare(&[a, b], "work", false);
        assert!((vs[0].as_slice()[2] - 0.9).abs() < 1e-12);
        assert!((vs[1].as_slice()[2] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn to_map_keys_match_feature_names() {
        let v = prepare_one(VenueRecord::bare("v"), "work", false);
        let map = v.to_map();
        assert_eq!(map.len(), FEATURE_COUNT);
        for name in FEATURE_NAMES {
            assert!(map.contains_key(name));
        }
    }
}
