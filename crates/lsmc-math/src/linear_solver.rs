//! Dense linear systems by Gaussian elimination with partial pivoting.
//!
//! The regression step of the Longstaff-Schwartz pricer produces small,
//! symmetric normal-equation systems (3 × 3 for the default quadratic fit),
//! so a direct elimination on the augmented matrix is all that is needed.
//!
//! A pivot is treated as zero when
//! `|pivot| <= pivot_tolerance * max |a_ij|`, the maximum being taken over the
//! coefficient block of the input. The test is relative so that the same
//! tolerance works for spot levels around 1 and around 100.

use crate::matrix::Matrix;
use lsmc_core::{
    ensure,
    errors::{Error, Result},
    Real,
};

/// Default relative pivot tolerance.
pub const DEFAULT_PIVOT_TOLERANCE: Real = 1e-12;

/// Gaussian elimination with partial (row) pivoting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianElimination {
    pivot_tolerance: Real,
}

impl Default for GaussianElimination {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl GaussianElimination {
    /// Create a solver with a custom relative pivot tolerance.
    pub fn new(pivot_tolerance: Real) -> Result<Self> {
        ensure!(
            pivot_tolerance.is_finite() && pivot_tolerance >= 0.0,
            "pivot tolerance must be finite and non-negative, got {pivot_tolerance}"
        );
        Ok(Self { pivot_tolerance })
    }

    /// The relative pivot tolerance.
    pub fn pivot_tolerance(&self) -> Real {
        self.pivot_tolerance
    }

    /// Solve `A · x = b` for square `A`.
    pub fn solve(&self, a: &Matrix, b: &[Real]) -> Result<Vec<Real>> {
        ensure!(a.is_square(), "matrix must be square, got {}×{}", a.rows(), a.cols());
        ensure!(
            b.len() == a.rows(),
            "right-hand side has {} entries, expected {}",
            b.len(),
            a.rows()
        );
        let n = a.rows();
        let mut augmented = Matrix::zeros(n, n + 1);
        for i in 0..n {
            for j in 0..n {
                augmented[(i, j)] = a[(i, j)];
            }
            augmented[(i, n)] = b[i];
        }
        self.solve_augmented(&augmented)
    }

    /// Solve the system whose `n × (n+1)` augmented matrix is `augmented`
    /// (last column is the right-hand side).
    pub fn solve_augmented(&self, augmented: &Matrix) -> Result<Vec<Real>> {
        let n = augmented.rows();
        ensure!(n > 0, "empty linear system");
        ensure!(
            augmented.cols() == n + 1,
            "augmented matrix must be {n}×{}, got {n}×{}",
            n + 1,
            augmented.cols()
        );

        let mut m = augmented.clone();
        let mut scale: Real = 0.0;
        for i in 0..n {
            for j in 0..n {
                scale = scale.max(m[(i, j)].abs());
            }
        }
        let threshold = self.pivot_tolerance * scale;

        // Forward elimination
        for i in 0..n {
            let mut pivot_row = i;
            for r in (i + 1)..n {
                if m[(r, i)].abs() > m[(pivot_row, i)].abs() {
                    pivot_row = r;
                }
            }
            m.swap_rows(i, pivot_row)?;

            let pivot = m[(i, i)];
            if scale == 0.0 || pivot.abs() <= threshold {
                return Err(Error::SingularMatrix { column: i, pivot });
            }

            for r in (i + 1)..n {
                let factor = m[(r, i)] / pivot;
                if factor == 0.0 {
                    continue;
                }
                m[(r, i)] = 0.0;
                for k in (i + 1)..=n {
                    m[(r, k)] -= factor * m[(i, k)];
                }
            }
        }

        // Back substitution
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let tail: Real = ((i + 1)..n).map(|j| m[(i, j)] * x[j]).sum();
            x[i] = (m[(i, n)] - tail) / m[(i, i)];
        }
        Ok(x)
    }
}

/// Solve an augmented system with the default tolerance.
pub fn solve_augmented(augmented: &Matrix) -> Result<Vec<Real>> {
    GaussianElimination::default().solve_augmented(augmented)
}
