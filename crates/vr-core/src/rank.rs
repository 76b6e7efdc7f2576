//! Ranking strategies.
//!
//! Orders prediction results by a chosen scalar key. The sort is stable, so
//! exact ties keep their input order rather than being reshuffled.

use std::str::FromStr;

use vr_common::{Error, PredictionResult};

/// How to order predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankStrategy {
    /// Descending by posterior mean probability.
    Mean,
    /// Descending by the 10th percentile: risk-averse, prefers venues whose
    /// worst-plausible-case probability is still high.
    LowerBound,
}

impl FromStr for RankStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Self::Mean),
            "lower_bound" => Ok(Self::LowerBound),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

impl RankStrategy {
    fn key(&self, p: &PredictionResult) -> f64 {
        match self {
            Self::Mean => p.probability,
            Self::LowerBound => p.p10,
        }
    }
}

/// Reorder predictions best-first under `strategy`. Same elements, no
/// additions or drops; stable for exact ties.
pub fn rank(mut predictions: Vec<PredictionResult>, strategy: RankStrategy) -> Vec<PredictionResult> {
    predictions.sort_by(|a, b| strategy.key(b).total_cmp(&strategy.key(a)));
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn pred(id: &str, probability: f64, p10: f64) -> PredictionResult {
        PredictionResult {
            venue_id: id.to_string(),
            probability,
            p10,
            p90: (p10 + 0.2).min(1.0),
            confidence: 0.8,
            features: BTreeMap::new(),
        }
    }

    fn order(preds: &[PredictionResult]) -> Vec<&str> {
        preds.iter().map(|p| p.venue_id.as_str()).collect()
    }

    #[test]
    fn mean_sorts_by_probability_descending() {
        let ranked = rank(
            vec![pred("a", 0.3, 0.1), pred("b", 0.9, 0.2), pred("c", 0.6, 0.5)],
            RankStrategy::Mean,
        );
        assert_eq!(order(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn lower_bound_sorts_by_p10_descending() {
        let ranked = rank(
            vec![pred("a", 0.9, 0.1), pred("b", 0.5, 0.4), pred("c", 0.6, 0.2)],
            RankStrategy::LowerBound,
        );
        assert_eq!(order(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn exact_ties_preserve_input_order() {
        let ranked = rank(
            vec![pred("first", 0.5, 0.3), pred("second", 0.5, 0.3), pred("third", 0.5, 0.3)],
            RankStrategy::Mean,
        );
        assert_eq!(order(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn ranking_is_a_permutation() {
        let input = vec![pred("a", 0.1, 0.0), pred("b", 0.7, 0.6), pred("c", 0.4, 0.3)];
        let ranked = rank(input.clone(), RankStrategy::Mean);
        assert_eq!(ranked.len(), input.len());
        for p in &input {
            assert!(ranked.iter().any(|r| r.venue_id == p.venue_id));
        }
    }

    #[test]
    fn strategy_parses_and_rejects() {
        assert_eq!("mean".parse::<RankStrategy>().unwrap(), RankStrategy::Mean);
        assert_eq!(
            "lower_bound".parse::<RankStrategy>().unwrap(),
            RankStrategy::LowerBound
        );
        let err = "upper_bound".parse::<RankStrategy>().unwrap_err();
        assert!(matches!(err, Error::UnknownStrategy(_)));
        assert_eq!(err.code(), 12);
    }
}
