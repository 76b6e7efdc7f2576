//! Venue Rank math utilities.

pub mod math;

pub use math::linalg::Matrix;
pub use math::quantile::percentile;
pub use math::sample::NormalSampler;
pub use math::stable::*;
