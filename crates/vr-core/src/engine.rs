//! The three-operation host surface: fit, predict, rank.
//!
//! Input validation happens here and surfaces as [`Error`]; everything
//! numerical below this layer is absorbed and logged. The engine owns the
//! configuration tables but never the active model; hosts hold the
//! artifact (typically in an `Arc`) and swap it wholesale on refit.

use std::collections::BTreeMap;

use vr_common::{Error, PredictionResult, Result, VenueRecord, FEATURE_COUNT, FEATURE_NAMES};
use vr_config::{AffinityTable, FeatureDefaults, PriorTable};
use vr_math::Matrix;

use crate::features::{FeatureEngineer, FeatureVector};
use crate::fit::{FitStrategy, LaplaceFitter, McmcFitter, PosteriorFitter};
use crate::labels::proxy_labels;
use crate::model::ModelArtifact;
use crate::predict::sample_predictions;
use crate::rank::{rank, RankStrategy};

/// Stateless pipeline front-end over the configuration tables.
#[derive(Debug, Clone)]
pub struct Engine {
    priors: PriorTable,
    engineer: FeatureEngineer,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(
            PriorTable::default(),
            AffinityTable::default(),
            FeatureDefaults::default(),
        )
    }
}

impl Engine {
    pub fn new(priors: PriorTable, affinity: AffinityTable, defaults: FeatureDefaults) -> Self {
        Self {
            priors,
            engineer: FeatureEngineer::new(affinity, defaults),
        }
    }

    pub fn priors(&self) -> &PriorTable {
        &self.priors
    }

    /// Prior-only model for cold starts; usable exactly like a fitted one.
    pub fn prior_model(&self) -> ModelArtifact {
        ModelArtifact::from_priors(&self.priors)
    }

    /// Fit a model on `records`.
    ///
    /// `labels` overrides the proxy labeler when provided (nonzero = liked)
    /// and must match `records` in length. `seed` drives the sampling
    /// fitter and the proxy-label fallback.
    pub fn fit(
        &self,
        records: &[VenueRecord],
        labels: Option<&[u8]>,
        vibe: &str,
        user_wants_veg: bool,
        strategy: FitStrategy,
        seed: u64,
    ) -> Result<ModelArtifact> {
        if records.is_empty() {
            return Err(Error::EmptyRecords);
        }
        if let Some(l) = labels {
            if l.len() != records.len() {
                return Err(Error::LabelLengthMismatch {
                    records: records.len(),
                    labels: l.len(),
                });
            }
        }

        let features = self.engineer.prepare(records, vibe, user_wants_veg);
        let x = feature_matrix(&features);
        let y: Vec<f64> = match labels {
            Some(l) => l.iter().map(|v| f64::from(u8::from(*v != 0))).collect(),
            None => proxy_labels(records, seed)
                .into_iter()
                .map(f64::from)
                .collect(),
        };

        let out = match strategy {
            FitStrategy::Approximate => LaplaceFitter::new().fit(&x, &y, &self.priors),
            FitStrategy::Exact => McmcFitter::new(seed).fit(&x, &y, &self.priors),
        };

        let coefficients: BTreeMap<String, f64> = FEATURE_NAMES
            .iter()
            .zip(&out.coefficients)
            .map(|(name, c)| ((*name).to_string(), *c))
            .collect();
        let feature_names: Vec<String> = FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect();

        let artifact = ModelArtifact::new(
            coefficients,
            out.covariance,
            feature_names,
            records.len() as u64,
        )?;
        tracing::info!(
            target: "engine.fit",
            n_records = records.len(),
            strategy = ?strategy,
            "model fitted"
        );
        Ok(artifact)
    }

    /// Predictive distributions for `records`, one result per record in
    /// input order. Total over well-formed inputs; an empty batch yields an
    /// empty vector.
    pub fn predict(
        &self,
        model: &ModelArtifact,
        records: &[VenueRecord],
        vibe: &str,
        user_wants_veg: bool,
        n_samples: usize,
        seed: u64,
    ) -> Vec<PredictionResult> {
        let features = self.engineer.prepare(records, vibe, user_wants_veg);
        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        sample_predictions(model, &ids, &features, n_samples, seed)
    }

    /// Reorder predictions under a named strategy ("mean" or
    /// "lower_bound"). Unknown names are an input error, never a silent
    /// default.
    pub fn rank(
        &self,
        predictions: Vec<PredictionResult>,
        strategy: &str,
    ) -> Result<Vec<PredictionResult>> {
        let strategy: RankStrategy = strategy.parse()?;
        Ok(rank(predictions, strategy))
    }

    /// Full pipeline: predict then rank in one call.
    pub fn predict_ranked(
        &self,
        model: &ModelArtifact,
        records: &[VenueRecord],
        vibe: &str,
        user_wants_veg: bool,
        n_samples: usize,
        seed: u64,
        strategy: &str,
    ) -> Result<Vec<PredictionResult>> {
        let predictions = self.predict(model, records, vibe, user_wants_veg, n_samples, seed);
        self.rank(predictions, strategy)
    }
}

/// Stack feature vectors into an n x k row-major matrix.
fn feature_matrix(features: &[FeatureVector]) -> Matrix {
    let mut data = Vec::with_capacity(features.len() * FEATURE_COUNT);
    for fv in features {
        data.extend_from_slice(fv.as_slice());
    }
    Matrix::from_row_major(features.len(), FEATURE_COUNT, data)
        .unwrap_or_else(|| Matrix::zeros(0, FEATURE_COUNT))
}
