//! Error types for Venue Rank.
//!
//! Only input errors are caller-visible failures. Numerical degradations
//! (non-convergence, singular Hessians, invalid covariance draws) are
//! absorbed inside the engine and surface as log events, never as errors.

use thiserror::Error;

/// Result type alias for Venue Rank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Venue Rank.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("empty record set: at least one venue is required")]
    EmptyRecords,

    #[error("label length mismatch: {records} records but {labels} labels")]
    LabelLengthMismatch { records: usize, labels: usize },

    #[error("unknown ranking strategy: {0:?} (expected \"mean\" or \"lower_bound\")")]
    UnknownStrategy(String),

    #[error("unknown fit strategy: {0:?} (expected \"approximate\" or \"exact\")")]
    UnknownFitStrategy(String),

    // Configuration errors (20-29)
    #[error("invalid priors table: {0}")]
    InvalidPriors(String),

    #[error("invalid affinity table: {0}")]
    InvalidAffinity(String),

    // Artifact errors (30-39)
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting by hosts.
    pub fn code(&self) -> u32 {
        match self {
            Error::EmptyRecords => 10,
            Error::LabelLengthMismatch { .. } => 11,
            Error::UnknownStrategy(_) => 12,
            Error::UnknownFitStrategy(_) => 13,
            Error::InvalidPriors(_) => 20,
            Error::InvalidAffinity(_) => 21,
            Error::InvalidArtifact(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// True when the error reflects malformed caller input rather than an
    /// internal failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyRecords
                | Error::LabelLengthMismatch { .. }
                | Error::UnknownStrategy(_)
                | Error::UnknownFitStrategy(_)
        )
    }
}
