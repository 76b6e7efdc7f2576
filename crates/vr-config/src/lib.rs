//! Venue Rank configuration tables.
//!
//! This crate provides:
//! - Typed structs for the coefficient prior table and vibe-affinity table
//! - The centralized feature-default table (missing-value policy)
//! - Embedded compile-time defaults plus file-based overrides
//! - Semantic validation

pub mod affinity;
pub mod defaults;
pub mod priors;

pub use affinity::AffinityTable;
pub use defaults::FeatureDefaults;
pub use priors::{PriorParams, PriorTable};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
