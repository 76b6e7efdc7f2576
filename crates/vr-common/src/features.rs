//! Canonical feature ordering.
//!
//! The order below is a system-wide invariant: it defines the semantic
//! meaning of each coefficient and each covariance row/column. Feature
//! vectors, prior tables, and model artifacts must all be produced and
//! consumed in this exact order.

/// Ordered feature names, intercept first.
pub const FEATURE_NAMES: [&str; 8] = [
    "intercept",
    "distance_norm",
    "rating_norm",
    "log_reviews",
    "vibe_match",
    "is_veg",
    "is_open",
    "completeness",
];

/// Number of model features, including the intercept.
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intercept_is_first() {
        assert_eq!(FEATURE_NAMES[0], "intercept");
        assert_eq!(FEATURE_COUNT, 8);
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in FEATURE_NAMES.iter().enumerate() {
            for b in FEATURE_NAMES.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
