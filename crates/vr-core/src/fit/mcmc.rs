//! Sampling-based fitter: random-walk Metropolis over the same model.
//!
//! Draws from the exact posterior instead of a Gaussian approximation.
//! Coefficients are the posterior sample means; covariance is the empirical
//! covariance of the retained draws. Satisfies the same contract as the
//! Laplace fitter, so callers are strategy-agnostic.

use vr_config::PriorTable;
use vr_math::{Matrix, NormalSampler};

use super::{log_posterior, stabilize_covariance, warn_on_divergence, FitOutput, PosteriorFitter};

/// Seeded random-walk Metropolis fitter.
#[derive(Debug, Clone)]
pub struct McmcFitter {
    draws: usize,
    burn_in: usize,
    seed: u64,
}

impl McmcFitter {
    pub fn new(seed: u64) -> Self {
        Self {
            draws: 1000,
            burn_in: 500,
            seed,
        }
    }

    pub fn with_draws(mut self, draws: usize) -> Self {
        self.draws = draws.max(2);
        self
    }

    pub fn with_burn_in(mut self, burn_in: usize) -> Self {
        self.burn_in = burn_in;
        self
    }
}

impl PosteriorFitter for McmcFitter {
    fn fit(&self, x: &Matrix, y: &[f64], priors: &PriorTable) -> FitOutput {
        let prior_means = priors.means();
        let prior_stds = priors.stds();
        let prior_precisions = priors.precisions();
        let k = x.cols();
        debug_assert_eq!(k, prior_means.len());

        // Standard random-walk scaling, with prior stds standing in for the
        // (unknown) posterior scale.
        let proposal_scale = 2.38 / (k as f64).sqrt();
        let mut sampler = NormalSampler::seeded(self.seed);

        let mut current = prior_means.clone();
        let mut current_lp = log_posterior(&current, x, y, &prior_means, &prior_precisions);
        let mut accepted = 0usize;
        let mut retained: Vec<Vec<f64>> = Vec::with_capacity(self.draws);

        for step in 0..(self.burn_in + self.draws) {
            let proposal: Vec<f64> = current
                .iter()
                .zip(&prior_stds)
                .map(|(c, s)| c + proposal_scale * s * sampler.standard())
                .collect();
            let proposal_lp = log_posterior(&proposal, x, y, &prior_means, &prior_precisions);

            if sampler.uniform().ln() < proposal_lp - current_lp {
                current = proposal;
                current_lp = proposal_lp;
                accepted += 1;
            }
            if step >= self.burn_in {
                retained.push(current.clone());
            }
        }

        let total = self.burn_in + self.draws;
        tracing::debug!(
            target: "fit.mcmc",
            draws = self.draws,
            burn_in = self.burn_in,
            acceptance_rate = accepted as f64 / total as f64,
            "metropolis chain complete"
        );

        // Posterior sample mean.
        let n = retained.len() as f64;
        let mut coefficients = vec![0.0; k];
        for draw in &retained {
            for j in 0..k {
                coefficients[j] += draw[j];
            }
        }
        for c in &mut coefficients {
            *c /= n;
        }
        warn_on_divergence(&coefficients);

        // Empirical covariance of the retained draws.
        let mut covariance = Matrix::zeros(k, k);
        for draw in &retained {
            for a in 0..k {
                let da = draw[a] - coefficients[a];
                for b in 0..k {
                    covariance.set(a, b, covariance.get(a, b) + da * (draw[b] - coefficients[b]));
                }
            }
        }
        let denom = (n - 1.0).max(1.0);
        for a in 0..k {
            for b in 0..k {
                covariance.set(a, b, covariance.get(a, b) / denom);
            }
        }

        FitOutput {
            coefficients,
            covariance: stabilize_covariance(covariance),
        }
    }
}
