//! Numerically stable scalar primitives.
//!
//! The logistic likelihood needs `log(1 + exp(x))` for linear predictors
//! that can be large in either direction; the naive form overflows past
//! x ≈ 710 and loses all precision below x ≈ -745. These helpers keep every
//! computation in a safe range.

/// Stable `log(1 + exp(x))`.
///
/// For large positive x this is x + log1p(exp(-x)); for the rest log1p(exp(x))
/// is exact. Both branches avoid overflow.
pub fn log1p_exp(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

/// Logistic sigmoid, computed without overflow for any finite input.
pub fn sigmoid(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Stable log-sum-exp over a slice of log-domain values.
pub fn log_sum_exp(logs: &[f64]) -> f64 {
    if logs.is_empty() {
        return f64::NEG_INFINITY;
    }
    if logs.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let m = logs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if m == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = logs.iter().map(|v| (v - m).exp()).sum();
    m + sum.ln()
}

/// Clip a value into `[lo, hi]`.
pub fn clip(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}
