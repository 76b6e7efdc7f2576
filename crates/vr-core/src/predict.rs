//! Monte Carlo predictive sampling.
//!
//! Propagates posterior coefficient uncertainty into a per-venue predictive
//! distribution: draw coefficient vectors from the posterior Gaussian, push
//! each through the linear predictor and sigmoid, then summarize the
//! probability samples as mean, p10/p90, and a confidence score.

use vr_common::PredictionResult;
use vr_math::{percentile, sigmoid, NormalSampler};

use crate::features::FeatureVector;
use crate::model::ModelArtifact;

/// Default number of Monte Carlo coefficient draws.
pub const DEFAULT_N_SAMPLES: usize = 1000;

/// Sample predictive distributions for a batch of venues.
///
/// Output order matches input order and `venue_ids` are propagated
/// unchanged. Total over any valid artifact: a covariance that fails
/// Cholesky falls back to independent marginal sampling from the diagonal,
/// which is an expected degraded path, not an error.
pub fn sample_predictions(
    model: &ModelArtifact,
    venue_ids: &[String],
    features: &[FeatureVector],
    n_samples: usize,
    seed: u64,
) -> Vec<PredictionResult> {
    debug_assert_eq!(venue_ids.len(), features.len());
    let n_samples = n_samples.max(1);

    let beta_mean = model.coefficient_vector();
    let covariance = model.covariance();
    let mut sampler = NormalSampler::seeded(seed);

    // One shared set of coefficient draws for the whole batch.
    let beta_samples: Vec<Vec<f64>> = match covariance.cholesky() {
        Some(chol) => (0..n_samples)
            .map(|_| sampler.multivariate(&beta_mean, &chol))
            .collect(),
        None => {
            tracing::debug!(
                target: "predict.sampling",
                "covariance not positive-definite; sampling independent marginals"
            );
            let stds: Vec<f64> = covariance
                .diag()
                .into_iter()
                .map(|v| v.max(0.0).sqrt())
                .collect();
            (0..n_samples)
                .map(|_| sampler.independent(&beta_mean, &stds))
                .collect()
        }
    };

    venue_ids
        .iter()
        .zip(features)
        .map(|(id, fv)| {
            let x = fv.as_slice();
            let probs: Vec<f64> = beta_samples
                .iter()
                .map(|beta| {
                    let eta: f64 = beta.iter().zip(x).map(|(b, xi)| b * xi).sum();
                    sigmoid(eta)
                })
                .collect();

            let mean = probs.iter().sum::<f64>() / probs.len() as f64;
            let p10 = percentile(&probs, 10.0);
            let p90 = percentile(&probs, 90.0);

            PredictionResult {
                venue_id: id.clone(),
                probability: mean,
                p10,
                p90,
                confidence: 1.0 - (p90 - p10),
                features: fv.to_map(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vr_common::FEATURE_COUNT;
    use vr_config::PriorTable;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("v{i}")).collect()
    }

    fn uniform_features(n: usize) -> Vec<FeatureVector> {
        (0..n)
            .map(|_| FeatureVector::new([1.0, 0.5, 0.5, 0.3, 0.5, 0.0, 0.5, 0.5]))
            .collect()
    }

    #[test]
    fn output_order_and_ids_preserved() {
        let model = ModelArtifact::from_priors(&PriorTable::default());
        let out = sample_predictions(&model, &ids(3), &uniform_features(3), 200, 1);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].venue_id, "v0");
        assert_eq!(out[2].venue_id, "v2");
    }

    #[test]
    fn bounds_are_ordered_and_in_unit_interval() {
        let model = ModelArtifact::from_priors(&PriorTable::default());
        for p in sample_predictions(&model, &ids(5), &uniform_features(5), 500, 9) {
            assert!(0.0 <= p.p10 && p.p10 <= p.p90 && p.p90 <= 1.0);
            assert!((0.0..=1.0).contains(&p.probability));
            assert!((p.confidence - (1.0 - (p.p90 - p.p10))).abs() < 1e-12);
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let model = ModelArtifact::from_priors(&PriorTable::default());
        let a = sample_predictions(&model, &ids(4), &uniform_features(4), 300, 42);
        let b = sample_predictions(&model, &ids(4), &uniform_features(4), 300, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_changes_samples() {
        let model = ModelArtifact::from_priors(&PriorTable::default());
        let a = sample_predictions(&model, &ids(1), &uniform_features(1), 300, 1);
        let b = sample_predictions(&model, &ids(1), &uniform_features(1), 300, 2);
        assert_ne!(a[0].probability, b[0].probability);
    }

    #[test]
    fn features_are_echoed_for_diagnostics() {
        let model = ModelArtifact::from_priors(&PriorTable::default());
        let out = sample_predictions(&model, &ids(1), &uniform_features(1), 50, 0);
        assert_eq!(out[0].features.len(), FEATURE_COUNT);
        assert!((out[0].features["intercept"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_sample_request_is_clamped() {
        let model = ModelArtifact::from_priors(&PriorTable::default());
        let out = sample_predictions(&model, &ids(1), &uniform_features(1), 0, 0);
        assert!(out[0].probability.is_finite());
    }

    #[test]
    fn marginal_fallback_still_produces_valid_results() {
        // A zero-variance covariance fails Cholesky and exercises the
        // independent-marginal fallback.
        use std::collections::BTreeMap;
        use vr_common::FEATURE_NAMES;
        use vr_math::Matrix;

        let coeffs: BTreeMap<String, f64> = FEATURE_NAMES
            .iter()
            .map(|n| ((*n).to_string(), 0.1))
            .collect();
        let names: Vec<String> = FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect();
        let model =
            ModelArtifact::new(coeffs, Matrix::zeros(FEATURE_COUNT, FEATURE_COUNT), names, 5)
                .unwrap();
        let out = sample_predictions(&model, &ids(2), &uniform_features(2), 100, 3);
        for p in out {
            // Degenerate covariance: every draw identical, zero-width interval.
            assert!((p.confidence - 1.0).abs() < 1e-12);
            assert!(p.probability.is_finite());
        }
    }
}
