//! Per-venue prediction output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Prediction summary for a single venue.
///
/// Created per predict call and consumed immediately by ranking; not
/// persisted anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Venue identifier, propagated unchanged from the input record.
    pub venue_id: String,

    /// Posterior mean of P(user likes venue).
    pub probability: f64,

    /// 10th percentile of the sampled probability distribution.
    pub p10: f64,

    /// 90th percentile of the sampled probability distribution.
    pub p90: f64,

    /// `1 - (p90 - p10)`; narrower credible interval means higher confidence.
    pub confidence: f64,

    /// Feature values used for this prediction, keyed by feature name.
    /// Kept for diagnostics and explainability.
    #[serde(default)]
    pub features: BTreeMap<String, f64>,
}

impl PredictionResult {
    /// Width of the 10-90 credible interval.
    pub fn interval_width(&self) -> f64 {
        self.p90 - self.p10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_width_matches_confidence() {
        let p = PredictionResult {
            venue_id: "v1".into(),
            probability: 0.6,
            p10: 0.4,
            p90: 0.8,
            confidence: 0.6,
            features: BTreeMap::new(),
        };
        assert!((p.interval_width() - 0.4).abs() < 1e-12);
        assert!((p.confidence - (1.0 - p.interval_width())).abs() < 1e-12);
    }

    #[test]
    fn serde_roundtrip() {
        let mut features = BTreeMap::new();
        features.insert("distance_norm".to_string(), 0.25);
        let p = PredictionResult {
            venue_id: "v9".into(),
            probability: 0.71,
            p10: 0.55,
            p90: 0.84,
            confidence: 0.71,
            features,
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: PredictionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
