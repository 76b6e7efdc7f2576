//! Venue Rank core: Bayesian estimation and uncertainty-aware ranking.
//!
//! The engine estimates, for each candidate venue, the probability that a
//! user will like it together with a calibrated credible interval, then
//! ranks venues under a selectable risk policy. Pipeline:
//!
//! ```text
//! records -> features -> (labels) -> fit -> ModelArtifact
//! (ModelArtifact, records) -> predict -> PredictionResult[] -> rank
//! ```
//!
//! Every operation is a pure, blocking computation over in-memory arrays.
//! Stochastic steps (posterior sampling, the proxy-label fallback) take an
//! explicit seed; a fixed seed reproduces results exactly. The model
//! artifact is immutable once built; hosts replace it wholesale (e.g. by
//! swapping an `Arc`) rather than mutating it in place.

pub mod engine;
pub mod features;
pub mod fit;
pub mod labels;
pub mod model;
pub mod predict;
pub mod rank;

#[cfg(feature = "test-utils")]
pub mod synthetic;

pub use engine::Engine;
pub use features::{FeatureEngineer, FeatureVector};
pub use fit::{FitStrategy, LaplaceFitter, McmcFitter, PosteriorFitter};
pub use model::ModelArtifact;
pub use rank::RankStrategy;

pub use vr_common::{Error, PredictionResult, Result, VenueRecord};
