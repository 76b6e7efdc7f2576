//! Core math modules.

pub mod linalg;
pub mod quantile;
pub mod sample;
pub mod stable;
