//! Posterior estimation.
//!
//! Two interchangeable strategies fit the same generative model
//!
//! ```text
//! y_i ~ Bernoulli(sigmoid(X_i . beta)),  beta_j ~ N(prior_mean_j, prior_std_j^2)
//! ```
//!
//! and satisfy one contract: a coefficient point estimate plus an
//! approximate posterior covariance. Strategy selection is an explicit
//! configuration value, never a runtime capability probe.

pub mod laplace;
pub mod mcmc;

use std::str::FromStr;

use vr_common::{Error, FEATURE_NAMES};
use vr_config::PriorTable;
use vr_math::{log1p_exp, sigmoid, Matrix};

pub use laplace::LaplaceFitter;
pub use mcmc::McmcFitter;

/// Jitter added to a singular Hessian before inversion, and the margin used
/// when shifting a covariance back to positive-definiteness.
pub(crate) const STABILIZE_EPS: f64 = 0.01;

/// Coefficients past this magnitude suggest (near-)separable training data;
/// logged, never fatal.
pub(crate) const COEFFICIENT_SANITY_BOUND: f64 = 50.0;

/// Which posterior estimation strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStrategy {
    /// Deterministic Laplace approximation (default): MAP estimate plus
    /// inverse-Hessian covariance.
    Approximate,
    /// Sampling-based estimation: MCMC draws, empirical moments.
    Exact,
}

impl FromStr for FitStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approximate" => Ok(Self::Approximate),
            "exact" => Ok(Self::Exact),
            other => Err(Error::UnknownFitStrategy(other.to_string())),
        }
    }
}

/// What a fitter produces: point estimate and covariance, both in canonical
/// feature order.
#[derive(Debug, Clone)]
pub struct FitOutput {
    pub coefficients: Vec<f64>,
    pub covariance: Matrix,
}

/// A posterior estimation strategy.
///
/// Implementations are total over well-formed inputs: numerical trouble is
/// logged and absorbed, never surfaced as an error.
pub trait PosteriorFitter {
    /// Fit on an n x k feature matrix and n binary labels.
    fn fit(&self, x: &Matrix, y: &[f64], priors: &PriorTable) -> FitOutput;
}

/// Log posterior density (up to a constant) of the Bernoulli-logistic model
/// with independent Gaussian priors. Uses the stable `y*eta - log1p_exp(eta)`
/// likelihood form.
pub(crate) fn log_posterior(
    beta: &[f64],
    x: &Matrix,
    y: &[f64],
    prior_means: &[f64],
    prior_precisions: &[f64],
) -> f64 {
    let eta = x.mul_vec(beta);
    let ll: f64 = y
        .iter()
        .zip(&eta)
        .map(|(yi, e)| yi * e - log1p_exp(*e))
        .sum();
    let lp: f64 = beta
        .iter()
        .zip(prior_means)
        .zip(prior_precisions)
        .map(|((b, m), prec)| -0.5 * prec * (b - m) * (b - m))
        .sum();
    ll + lp
}

/// Gradient of the negative log posterior.
pub(crate) fn neg_log_posterior_gradient(
    beta: &[f64],
    x: &Matrix,
    y: &[f64],
    prior_means: &[f64],
    prior_precisions: &[f64],
) -> Vec<f64> {
    let eta = x.mul_vec(beta);
    let k = beta.len();
    let mut grad = vec![0.0; k];
    // -X^T (y - p) term.
    for (i, e) in eta.iter().enumerate() {
        let residual = y[i] - sigmoid(*e);
        for j in 0..k {
            grad[j] -= x.get(i, j) * residual;
        }
    }
    // + precision * (beta - prior_mean) term.
    for j in 0..k {
        grad[j] += prior_precisions[j] * (beta[j] - prior_means[j]);
    }
    grad
}

/// Invert the negated log-posterior Hessian, adding jitter when singular.
///
/// Escalates the jitter if a single dose is not enough; this path is a
/// deterministic fallback, never a failure.
pub(crate) fn invert_hessian(hessian: &Matrix) -> Matrix {
    if let Some(inv) = hessian.inverse() {
        return inv;
    }
    tracing::warn!(
        target: "fit.stabilize",
        "singular Hessian, using regularized inverse"
    );
    let mut jitter = STABILIZE_EPS;
    for _ in 0..8 {
        let mut h = hessian.clone();
        h.add_scaled_identity(jitter);
        if let Some(inv) = h.inverse() {
            return inv;
        }
        jitter *= 10.0;
    }
    // Unreachable for finite input; identity keeps the contract total.
    tracing::warn!(
        target: "fit.stabilize",
        "Hessian not invertible at any jitter level, substituting identity covariance"
    );
    Matrix::identity(hessian.rows())
}

/// Symmetrize a covariance and force positive semi-definiteness by shifting
/// the spectrum when the minimum eigenvalue is negative.
pub(crate) fn stabilize_covariance(cov: Matrix) -> Matrix {
    let mut cov = cov.symmetrized();
    let min_eig = cov.min_sym_eigenvalue();
    if min_eig < 0.0 {
        tracing::warn!(
            target: "fit.stabilize",
            min_eigenvalue = min_eig,
            "covariance not positive semi-definite, shifting spectrum"
        );
        cov.add_scaled_identity(-min_eig + STABILIZE_EPS);
    }
    cov
}

/// Log a warning for any coefficient whose magnitude suggests divergence
/// under separable labels.
pub(crate) fn warn_on_divergence(beta: &[f64]) {
    for (j, b) in beta.iter().enumerate() {
        if b.abs() > COEFFICIENT_SANITY_BOUND {
            tracing::warn!(
                target: "fit.sanity",
                feature = FEATURE_NAMES.get(j).copied().unwrap_or("?"),
                coefficient = *b,
                "coefficient magnitude exceeds sanity bound; labels may be separable"
            );
        }
    }
}
