//! Vibe-to-category affinity table.
//!
//! Fixed scores in [0, 1] expressing how well a venue category matches a
//! named user mood. Unknown vibes and unknown categories both resolve to a
//! neutral 0.5 so the feature neither rewards nor penalizes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vr_common::{Error, Result};

/// Neutral affinity used for unknown vibe or category.
pub const NEUTRAL_AFFINITY: f64 = 0.5;

/// Complete affinity configuration: vibe -> category -> score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityTable {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    pub vibes: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Embedded default affinity JSON for fallback.
const DEFAULT_AFFINITY_JSON: &str = include_str!("schemas/affinity.default.json");

impl AffinityTable {
    /// Load an affinity table from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_json(&content)
    }

    /// Parse an affinity table from a JSON string and validate it.
    pub fn parse_json(json: &str) -> Result<Self> {
        let table: AffinityTable = serde_json::from_str(json)
            .map_err(|e| Error::InvalidAffinity(format!("invalid JSON: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Affinity score for a (vibe, category) pair, defaulting to
    /// [`NEUTRAL_AFFINITY`] on any miss.
    pub fn score(&self, vibe: &str, category: &str) -> f64 {
        self.vibes
            .get(vibe)
            .and_then(|cats| cats.get(category))
            .copied()
            .unwrap_or(NEUTRAL_AFFINITY)
    }

    /// Known vibe names.
    pub fn vibe_names(&self) -> impl Iterator<Item = &str> {
        self.vibes.keys().map(String::as_str)
    }

    /// Semantic validation: every score in [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (vibe, cats) in &self.vibes {
            for (cat, score) in cats {
                if !(0.0..=1.0).contains(score) {
                    return Err(Error::InvalidAffinity(format!(
                        "score for ({vibe:?}, {cat:?}) out of [0, 1]: {score}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for AffinityTable {
    fn default() -> Self {
        Self::parse_json(DEFAULT_AFFINITY_JSON).expect("embedded default affinity JSON is invalid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_parses_and_validates() {
        let t = AffinityTable::default();
        assert!(t.validate().is_ok());
        assert_eq!(t.vibe_names().count(), 5);
    }

    #[test]
    fn known_pairs_match_defaults() {
        let t = AffinityTable::default();
        assert!((t.score("insta", "cafe") - 0.95).abs() < 1e-12);
        assert!((t.score("work", "grocery") - 0.2).abs() < 1e-12);
        assert!((t.score("romantic", "restaurant") - 0.95).abs() < 1e-12);
    }

    #[test]
    fn unknown_vibe_is_neutral() {
        let t = AffinityTable::default();
        assert!((t.score("sleepy", "cafe") - NEUTRAL_AFFINITY).abs() < 1e-12);
    }

    #[test]
    fn unknown_category_is_neutral() {
        let t = AffinityTable::default();
        assert!((t.score("insta", "laundromat") - NEUTRAL_AFFINITY).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_out_of_range_score() {
        let mut t = AffinityTable::default();
        t.vibes
            .get_mut("work")
            .unwrap()
            .insert("cafe".to_string(), 1.5);
        assert!(matches!(t.validate(), Err(Error::InvalidAffinity(_))));
    }

    #[test]
    fn serde_roundtrip() {
        let t = AffinityTable::default();
        let json = serde_json::to_string(&t).unwrap();
        let back = AffinityTable::parse_json(&json).unwrap();
        assert!((back.score("budget", "grocery") - 0.9).abs() < 1e-12);
    }
}
