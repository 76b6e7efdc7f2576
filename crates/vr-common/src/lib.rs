//! Venue Rank common types and errors.
//!
//! This crate provides foundational types shared across vr-core modules:
//! - The versioned venue input record
//! - Per-venue prediction results
//! - Common error types
//! - Schema versioning

pub mod error;
pub mod features;
pub mod record;
pub mod result;
pub mod schema;

pub use error::{Error, Result};
pub use features::{FEATURE_COUNT, FEATURE_NAMES};
pub use record::VenueRecord;
pub use result::PredictionResult;
pub use schema::SCHEMA_VERSION;
