//! Small dense matrix operations (inline, no external dependency).
//!
//! The engine works with k x k matrices where k is the feature count (8),
//! so a straightforward row-major implementation with partial-pivot
//! inversion and Jacobi eigenvalues is both sufficient and easy to audit.

use serde::{Deserialize, Serialize};

/// Dense row-major matrix of f64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Pivots smaller than this are treated as singular.
const PIVOT_EPS: f64 = 1e-12;

impl Matrix {
    /// All-zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Identity matrix of size n.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Diagonal matrix from a slice.
    pub fn from_diag(diag: &[f64]) -> Self {
        let mut m = Self::zeros(diag.len(), diag.len());
        for (i, &v) in diag.iter().enumerate() {
            m.set(i, i, v);
        }
        m
    }

    /// Build from a row-major data vector. Returns `None` when the length
    /// does not match the shape.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        self.data[i * self.cols + j] = v;
    }

    /// Row-major view of the underlying data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Main diagonal.
    pub fn diag(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols)).map(|i| self.get(i, i)).collect()
    }

    /// Matrix-vector product.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols);
        let mut out = vec![0.0; self.rows];
        for i in 0..self.rows {
            let mut acc = 0.0;
            for j in 0..self.cols {
                acc += self.get(i, j) * v[j];
            }
            out[i] = acc;
        }
        out
    }

    /// Matrix-matrix product.
    pub fn matmul(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.cols, other.rows);
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    out.set(i, j, out.get(i, j) + a * other.get(k, j));
                }
            }
        }
        out
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(j, i, self.get(i, j));
            }
        }
        out
    }

    /// Adds `scale * I` in place.
    pub fn add_scaled_identity(&mut self, scale: f64) {
        let n = self.rows.min(self.cols);
        for i in 0..n {
            self.set(i, i, self.get(i, i) + scale);
        }
    }

    /// Averages the matrix with its transpose.
    pub fn symmetrized(&self) -> Matrix {
        debug_assert_eq!(self.rows, self.cols);
        let mut out = Matrix::zeros(self.rows, self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(i, j, 0.5 * (self.get(i, j) + self.get(j, i)));
            }
        }
        out
    }

    /// Max absolute asymmetry `|a_ij - a_ji|`.
    pub fn asymmetry(&self) -> f64 {
        let mut worst: f64 = 0.0;
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                worst = worst.max((self.get(i, j) - self.get(j, i)).abs());
            }
        }
        worst
    }

    /// Inverse by Gauss-Jordan elimination with partial pivoting.
    ///
    /// Returns `None` when a pivot collapses below tolerance (singular).
    pub fn inverse(&self) -> Option<Matrix> {
        debug_assert_eq!(self.rows, self.cols);
        let n = self.rows;
        let mut a = self.clone();
        let mut inv = Matrix::identity(n);

        for col in 0..n {
            // Partial pivot: largest magnitude entry on or below the diagonal.
            let mut pivot_row = col;
            let mut pivot_mag = a.get(col, col).abs();
            for r in (col + 1)..n {
                let mag = a.get(r, col).abs();
                if mag > pivot_mag {
                    pivot_row = r;
                    pivot_mag = mag;
                }
            }
            if pivot_mag < PIVOT_EPS || !pivot_mag.is_finite() {
                return None;
            }
            if pivot_row != col {
                a.swap_rows(col, pivot_row);
                inv.swap_rows(col, pivot_row);
            }

            let pivot = a.get(col, col);
            for j in 0..n {
                a.set(col, j, a.get(col, j) / pivot);
                inv.set(col, j, inv.get(col, j) / pivot);
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = a.get(r, col);
                if factor == 0.0 {
                    continue;
                }
                for j in 0..n {
                    a.set(r, j, a.get(r, j) - factor * a.get(col, j));
                    inv.set(r, j, inv.get(r, j) - factor * inv.get(col, j));
                }
            }
        }
        Some(inv)
    }

    /// Lower-triangular Cholesky factor L with `L L^T = self`.
    ///
    /// Returns `None` when the matrix is not (numerically) positive-definite.
    pub fn cholesky(&self) -> Option<Matrix> {
        debug_assert_eq!(self.rows, self.cols);
        let n = self.rows;
        let mut l = Matrix::zeros(n, n);
        for i in 0..n {
            for j in 0..=i {
                let mut sum = self.get(i, j);
                for k in 0..j {
                    sum -= l.get(i, k) * l.get(j, k);
                }
                if i == j {
                    if sum <= 0.0 || !sum.is_finite() {
                        return None;
                    }
                    l.set(i, j, sum.sqrt());
                } else {
                    l.set(i, j, sum / l.get(j, j));
                }
            }
        }
        Some(l)
    }

    /// Eigenvalues of a symmetric matrix via cyclic Jacobi rotations.
    ///
    /// Input is assumed symmetric; callers symmetrize first.
    pub fn sym_eigenvalues(&self) -> Vec<f64> {
        debug_assert_eq!(self.rows, self.cols);
        let n = self.rows;
        let mut a = self.clone();

        // 50 sweeps is far more than 8x8 symmetric matrices ever need.
        for _ in 0..50 {
            let mut off_diag = 0.0;
            for i in 0..n {
                for j in (i + 1)..n {
                    off_diag += a.get(i, j).abs();
                }
            }
            if off_diag < 1e-14 {
                break;
            }
            for p in 0..n {
                for q in (p + 1)..n {
                    let apq = a.get(p, q);
                    if apq.abs() < 1e-300 {
                        continue;
                    }
                    let app = a.get(p, p);
                    let aqq = a.get(q, q);
                    // Classic Jacobi rotation angle.
                    let phi = 0.5 * (2.0 * apq).atan2(app - aqq);
                    let (s, c) = phi.sin_cos();
                    for k in 0..n {
                        let akp = a.get(k, p);
                        let akq = a.get(k, q);
                        a.set(k, p, c * akp + s * akq);
                        a.set(k, q, -s * akp + c * akq);
                    }
                    for k in 0..n {
                        let apk = a.get(p, k);
                        let aqk = a.get(q, k);
                        a.set(p, k, c * apk + s * aqk);
                        a.set(q, k, -s * apk + c * aqk);
                    }
                }
            }
        }
        a.diag()
    }

    /// Smallest eigenvalue of a symmetric matrix.
    pub fn min_sym_eigenvalue(&self) -> f64 {
        self.sym_eigenvalues()
            .into_iter()
            .fold(f64::INFINITY, f64::min)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            let tmp = self.get(a, j);
            self.set(a, j, self.get(b, j));
            self.set(b, j, tmp);
        }
    }
}
