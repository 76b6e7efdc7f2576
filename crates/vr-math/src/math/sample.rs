//! Seeded Gaussian and Bernoulli sampling.
//!
//! Every stochastic path in the engine draws through this sampler so that a
//! fixed seed reproduces results exactly. No global random state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::linalg::Matrix;

/// Deterministic normal/Bernoulli sampler backed by a seeded [`StdRng`].
#[derive(Debug)]
pub struct NormalSampler {
    rng: StdRng,
    cached: Option<f64>,
}

impl NormalSampler {
    /// Create a sampler from an explicit seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            cached: None,
        }
    }

    /// One standard normal draw (Box-Muller, pairs cached).
    pub fn standard(&mut self) -> f64 {
        if let Some(z) = self.cached.take() {
            return z;
        }
        // 1 - U keeps u1 in (0, 1] so the log is finite.
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random::<f64>();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;
        self.cached = Some(r * theta.sin());
        r * theta.cos()
    }

    /// Vector of independent standard normal draws.
    pub fn standard_vec(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.standard()).collect()
    }

    /// One multivariate normal draw `mean + L z` given the lower Cholesky
    /// factor `L` of the covariance.
    pub fn multivariate(&mut self, mean: &[f64], chol_lower: &Matrix) -> Vec<f64> {
        let z = self.standard_vec(mean.len());
        let lz = chol_lower.mul_vec(&z);
        mean.iter().zip(lz).map(|(m, v)| m + v).collect()
    }

    /// One draw with independent marginals `N(mean_i, std_i^2)`.
    pub fn independent(&mut self, mean: &[f64], stds: &[f64]) -> Vec<f64> {
        debug_assert_eq!(mean.len(), stds.len());
        mean.iter()
            .zip(stds)
            .map(|(m, s)| m + s * self.standard())
            .collect()
    }

    /// One Bernoulli(p) draw.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.rng.random::<f64>() < p
    }

    /// Uniform draw in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
