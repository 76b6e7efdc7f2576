//! Coefficient prior table.
//!
//! Each model feature carries an independent Gaussian prior
//! `N(mean, std^2)` encoding domain knowledge. The table is a read-only
//! process-wide constant once loaded; it is never mutated by fitting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vr_common::{Error, Result, FEATURE_NAMES};

/// Gaussian prior parameters for one coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorParams {
    pub mean: f64,
    pub std: f64,

    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl PriorParams {
    pub fn new(mean: f64, std: f64) -> Self {
        Self {
            mean,
            std,
            comment: None,
        }
    }

    /// Prior precision: 1 / std^2.
    pub fn precision(&self) -> f64 {
        1.0 / (self.std * self.std)
    }

    /// Prior variance: std^2.
    pub fn variance(&self) -> f64 {
        self.std * self.std
    }
}

/// Complete prior configuration, keyed by canonical feature name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorTable {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    pub features: BTreeMap<String, PriorParams>,
}

/// Embedded default priors JSON for fallback.
const DEFAULT_PRIORS_JSON: &str = include_str!("schemas/priors.default.json");

impl PriorTable {
    /// Load a prior table from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_json(&content)
    }

    /// Parse a prior table from a JSON string and validate it.
    pub fn parse_json(json: &str) -> Result<Self> {
        let table: PriorTable = serde_json::from_str(json)
            .map_err(|e| Error::InvalidPriors(format!("invalid JSON: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    /// Prior parameters for a named feature; `N(0, 1)` when the table has
    /// no entry.
    pub fn get(&self, feature: &str) -> PriorParams {
        self.features
            .get(feature)
            .cloned()
            .unwrap_or_else(|| PriorParams::new(0.0, 1.0))
    }

    /// Prior means in canonical feature order.
    pub fn means(&self) -> Vec<f64> {
        FEATURE_NAMES.iter().map(|f| self.get(f).mean).collect()
    }

    /// Prior standard deviations in canonical feature order.
    pub fn stds(&self) -> Vec<f64> {
        FEATURE_NAMES.iter().map(|f| self.get(f).std).collect()
    }

    /// Prior precisions (1/std^2) in canonical feature order.
    pub fn precisions(&self) -> Vec<f64> {
        FEATURE_NAMES
            .iter()
            .map(|f| self.get(f).precision())
            .collect()
    }

    /// Semantic validation: every canonical feature present, every std
    /// strictly positive, every value finite.
    pub fn validate(&self) -> Result<()> {
        for name in FEATURE_NAMES {
            let Some(p) = self.features.get(name) else {
                return Err(Error::InvalidPriors(format!("missing feature {name:?}")));
            };
            if !p.mean.is_finite() || !p.std.is_finite() {
                return Err(Error::InvalidPriors(format!(
                    "non-finite parameters for {name:?}"
                )));
            }
            if p.std <= 0.0 {
                return Err(Error::InvalidPriors(format!(
                    "std for {name:?} must be positive, got {}",
                    p.std
                )));
            }
        }
        Ok(())
    }
}

impl Default for PriorTable {
    fn default() -> Self {
        // The embedded JSON is validated by the test suite; parsing it can
        // only fail if the compiled-in document is broken.
        Self::parse_json(DEFAULT_PRIORS_JSON).expect("embedded default priors JSON is invalid")
    }
}
