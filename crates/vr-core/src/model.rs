//! The fitted model artifact.
//!
//! Coefficients, posterior covariance, the feature order they are indexed
//! by, and the training sample count. Immutable once constructed; refitting
//! produces a new artifact that the host swaps in wholesale, so concurrent
//! readers never observe a half-updated coefficients/covariance pair.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vr_common::{schema, Error, Result, FEATURE_NAMES};
use vr_config::PriorTable;
use vr_math::Matrix;

/// Tolerated asymmetry when validating a covariance matrix.
const SYMMETRY_TOL: f64 = 1e-8;

/// Fitted (or prior-only) model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    schema_version: String,
    coefficients: BTreeMap<String, f64>,
    covariance: Matrix,
    feature_names: Vec<String>,
    n_samples: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl ModelArtifact {
    /// Build an artifact, enforcing the structural invariants: name count,
    /// coefficient count, and covariance shape all agree, every feature
    /// name has a coefficient, and the covariance is square and symmetric.
    pub fn new(
        coefficients: BTreeMap<String, f64>,
        covariance: Matrix,
        feature_names: Vec<String>,
        n_samples: u64,
    ) -> Result<Self> {
        let k = feature_names.len();
        if coefficients.len() != k {
            return Err(Error::InvalidArtifact(format!(
                "{} coefficients for {} features",
                coefficients.len(),
                k
            )));
        }
        for name in &feature_names {
            if !coefficients.contains_key(name) {
                return Err(Error::InvalidArtifact(format!(
                    "missing coefficient for feature {name:?}"
                )));
            }
        }
        if covariance.rows() != k || covariance.cols() != k {
            return Err(Error::InvalidArtifact(format!(
                "covariance is {}x{} but there are {} features",
                covariance.rows(),
                covariance.cols(),
                k
            )));
        }
        if covariance.asymmetry() > SYMMETRY_TOL {
            return Err(Error::InvalidArtifact(format!(
                "covariance asymmetry {} exceeds tolerance",
                covariance.asymmetry()
            )));
        }
        Ok(Self {
            schema_version: schema::SCHEMA_VERSION.to_string(),
            coefficients,
            covariance,
            feature_names,
            n_samples,
            created_at: Some(Utc::now()),
        })
    }

    /// Prior-only artifact: coefficients are the prior means, covariance is
    /// the diagonal of prior variances, and `n_samples` is 0. Fully usable
    /// for prediction and ranking.
    pub fn from_priors(priors: &PriorTable) -> Self {
        let feature_names: Vec<String> = FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect();
        let coefficients: BTreeMap<String, f64> = feature_names
            .iter()
            .map(|name| (name.clone(), priors.get(name).mean))
            .collect();
        let variances: Vec<f64> = feature_names
            .iter()
            .map(|name| priors.get(name).variance())
            .collect();
        Self {
            schema_version: schema::SCHEMA_VERSION.to_string(),
            coefficients,
            covariance: Matrix::from_diag(&variances),
            feature_names,
            n_samples: 0,
            created_at: Some(Utc::now()),
        }
    }

    pub fn coefficients(&self) -> &BTreeMap<String, f64> {
        &self.coefficients
    }

    pub fn covariance(&self) -> &Matrix {
        &self.covariance
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_samples(&self) -> u64 {
        self.n_samples
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Coefficients as a vector in the artifact's feature order.
    pub fn coefficient_vector(&self) -> Vec<f64> {
        self.feature_names
            .iter()
            .map(|name| self.coefficients[name])
            .collect()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, re-checking invariants and schema
    /// compatibility.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        if !schema::is_compatible(&artifact.schema_version) {
            return Err(Error::InvalidArtifact(format!(
                "incompatible schema version {:?}",
                artifact.schema_version
            )));
        }
        Self::new(
            artifact.coefficients,
            artifact.covariance,
            artifact.feature_names,
            artifact.n_samples,
        )
        .map(|mut a| {
            a.created_at = artifact.created_at;
            a.schema_version = artifact.schema_version;
            a
        })
    }

    /// Write the artifact to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read an artifact back from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
