//! Laplace approximation: the default, deterministic fitter.
//!
//! Finds the MAP estimate with BFGS (analytic gradient, initialized at the
//! prior means) and approximates the posterior as a Gaussian whose
//! covariance is the inverse of the negated log-posterior Hessian at that
//! point. Non-convergence and singular Hessians degrade gracefully: the
//! best point found is used and the inverse is regularized.

use vr_config::PriorTable;
use vr_math::{sigmoid, Matrix};

use super::{
    invert_hessian, log_posterior, neg_log_posterior_gradient, stabilize_covariance,
    warn_on_divergence, FitOutput, PosteriorFitter,
};

/// Armijo sufficient-decrease constant for the backtracking line search.
const ARMIJO_C1: f64 = 1e-4;

/// Maximum step halvings per line search.
const MAX_BACKTRACKS: usize = 40;

/// Deterministic MAP + inverse-Hessian fitter.
#[derive(Debug, Clone)]
pub struct LaplaceFitter {
    max_iter: usize,
    grad_tol: f64,
}

impl Default for LaplaceFitter {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            grad_tol: 1e-6,
        }
    }
}

impl LaplaceFitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

impl PosteriorFitter for LaplaceFitter {
    fn fit(&self, x: &Matrix, y: &[f64], priors: &PriorTable) -> FitOutput {
        let prior_means = priors.means();
        let prior_precisions = priors.precisions();
        let k = x.cols();
        debug_assert_eq!(k, prior_means.len());
        debug_assert_eq!(x.rows(), y.len());

        let objective =
            |beta: &[f64]| -log_posterior(beta, x, y, &prior_means, &prior_precisions);
        let gradient =
            |beta: &[f64]| neg_log_posterior_gradient(beta, x, y, &prior_means, &prior_precisions);

        // BFGS from the prior means.
        let mut beta = prior_means.clone();
        let mut f = objective(&beta);
        let mut grad = gradient(&beta);
        let mut h_inv = Matrix::identity(k);

        let mut best_beta = beta.clone();
        let mut best_f = f;
        let mut converged = false;
        let mut iterations = 0;

        for iter in 0..self.max_iter {
            iterations = iter;
            if inf_norm(&grad) < self.grad_tol {
                converged = true;
                break;
            }

            let mut direction: Vec<f64> = h_inv.mul_vec(&grad).iter().map(|v| -v).collect();
            let mut slope = dot(&grad, &direction);
            if slope >= 0.0 {
                // Curvature estimate went bad; restart from steepest descent.
                h_inv = Matrix::identity(k);
                direction = grad.iter().map(|g| -g).collect();
                slope = -dot(&grad, &grad);
            }

            // Backtracking line search with the Armijo condition.
            let mut alpha = 1.0;
            let mut candidate = step(&beta, &direction, alpha);
            let mut f_new = objective(&candidate);
            let mut backtracks = 0;
            while f_new > f + ARMIJO_C1 * alpha * slope && backtracks < MAX_BACKTRACKS {
                alpha *= 0.5;
                candidate = step(&beta, &direction, alpha);
                f_new = objective(&candidate);
                backtracks += 1;
            }
            if f_new >= f {
                // No descent possible along this direction at any step size.
                break;
            }

            let grad_new = gradient(&candidate);
            let s: Vec<f64> = candidate
                .iter()
                .zip(&beta)
                .map(|(new, old)| new - old)
                .collect();
            let yv: Vec<f64> = grad_new
                .iter()
                .zip(&grad)
                .map(|(new, old)| new - old)
                .collect();
            let sy = dot(&s, &yv);
            if sy > 1e-12 {
                h_inv = bfgs_update(&h_inv, &s, &yv, sy);
            }

            beta = candidate;
            f = f_new;
            grad = grad_new;
            if f < best_f {
                best_f = f;
                best_beta = beta.clone();
            }
        }

        if !converged {
            tracing::warn!(
                target: "fit.laplace",
                iterations,
                grad_norm = inf_norm(&grad),
                "optimization did not converge; using best point found"
            );
        }
        warn_on_divergence(&best_beta);

        // Analytic Hessian of the negative log posterior at the MAP:
        // X^T W X + diag(precision), W = diag(p * (1 - p)).
        let mut hessian = Matrix::zeros(k, k);
        let eta = x.mul_vec(&best_beta);
        for (i, e) in eta.iter().enumerate() {
            let p = sigmoid(*e);
            let w = p * (1.0 - p);
            for a in 0..k {
                let xa = x.get(i, a);
                if xa == 0.0 {
                    continue;
                }
                for b in 0..k {
                    hessian.set(a, b, hessian.get(a, b) + w * xa * x.get(i, b));
                }
            }
        }
        for j in 0..k {
            hessian.set(j, j, hessian.get(j, j) + prior_precisions[j]);
        }

        let covariance = stabilize_covariance(invert_hessian(&hessian));

        FitOutput {
            coefficients: best_beta,
            covariance,
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn inf_norm(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
}

fn step(beta: &[f64], direction: &[f64], alpha: f64) -> Vec<f64> {
    beta.iter()
        .zip(direction)
        .map(|(b, d)| b + alpha * d)
        .collect()
}

/// Standard BFGS inverse-Hessian update:
/// `H' = (I - rho s y^T) H (I - rho y s^T) + rho s s^T`.
fn bfgs_update(h_inv: &Matrix, s: &[f64], y: &[f64], sy: f64) -> Matrix {
    let k = s.len();
    let rho = 1.0 / sy;
    let mut left = Matrix::identity(k);
    for i in 0..k {
        for j in 0..k {
            left.set(i, j, left.get(i, j) - rho * s[i] * y[j]);
        }
    }
    let mut updated = left.matmul(h_inv).matmul(&left.transpose());
    for i in 0..k {
        for j in 0..k {
            updated.set(i, j, updated.get(i, j) + rho * s[i] * s[j]);
        }
    }
    updated
}
