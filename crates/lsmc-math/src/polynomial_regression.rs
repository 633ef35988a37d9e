//! Polynomial least-squares regression via the normal equations.
//!
//! Fits `y ≈ Σ_{i=0}^{d} c_i x^i` to scattered samples by solving
//! $(A^\top A)\,c = A^\top y$ where $A$ is the Vandermonde design matrix.
//! The normal matrix only depends on the power sums
//! $S_k = \sum_j x_j^k$, $k = 0..2d$, and the right-hand side on
//! $T_k = \sum_j x_j^k y_j$, $k = 0..d$, so neither $A$ nor $A^\top A$ is ever
//! materialised as a product.
//!
//! Normal equations square the condition number of the design matrix. That is
//! acceptable for the small fixed degrees and sample counts used for
//! continuation-value estimation; larger problems should use a QR/SVD based
//! fit instead.

use crate::linear_solver::GaussianElimination;
use crate::matrix::Matrix;
use lsmc_core::{ensure, errors::Result, Real};
use tracing::trace;

/// Largest supported polynomial degree.
pub const MAX_DEGREE: usize = 32;

/// Build the `(d+1) × (d+2)` augmented normal-equation system for a
/// degree-`d` fit.
pub fn normal_equations(xs: &[Real], ys: &[Real], degree: usize) -> Result<Matrix> {
    ensure!(
        degree <= MAX_DEGREE,
        "polynomial degree must be at most {MAX_DEGREE}, got {degree}"
    );
    validate_samples(xs, ys)?;

    let n = degree + 1;
    let mut power_sums = vec![0.0; 2 * degree + 1];
    let mut weighted_sums = vec![0.0; n];
    for (&x, &y) in xs.iter().zip(ys) {
        let mut p = 1.0;
        for (k, s) in power_sums.iter_mut().enumerate() {
            *s += p;
            if k < n {
                weighted_sums[k] += p * y;
            }
            p *= x;
        }
    }

    let mut augmented = Matrix::zeros(n, n + 1);
    for i in 0..n {
        for j in 0..n {
            augmented[(i, j)] = power_sums[i + j];
        }
        augmented[(i, n)] = weighted_sums[i];
    }
    Ok(augmented)
}

fn validate_samples(xs: &[Real], ys: &[Real]) -> Result<()> {
    ensure!(
        xs.len() == ys.len(),
        "x and y must have the same length, got {} and {}",
        xs.len(),
        ys.len()
    );
    ensure!(!xs.is_empty(), "at least one sample is required");
    ensure!(
        xs.iter().chain(ys).all(|v| v.is_finite()),
        "samples must be finite"
    );
    Ok(())
}

/// A fitted polynomial `Σ c_i x^i`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialRegression {
    coefficients: Vec<Real>,
}

impl PolynomialRegression {
    /// Least-squares fit of a degree-`degree` polynomial.
    ///
    /// Fails with `InvalidInput` for empty, mismatched or non-finite samples
    /// and with `SingularMatrix` when the samples cannot determine
    /// `degree + 1` coefficients (e.g. fewer distinct x-values than that).
    pub fn fit(xs: &[Real], ys: &[Real], degree: usize) -> Result<Self> {
        Self::fit_with(xs, ys, degree, &GaussianElimination::default())
    }

    /// Same as [`PolynomialRegression::fit`] with an explicit solver.
    pub fn fit_with(
        xs: &[Real],
        ys: &[Real],
        degree: usize,
        solver: &GaussianElimination,
    ) -> Result<Self> {
        let system = normal_equations(xs, ys, degree)?;
        let coefficients = solver.solve_augmented(&system)?;
        trace!(samples = xs.len(), degree, ?coefficients, "polynomial fit");
        Ok(Self { coefficients })
    }

    /// Wrap known coefficients (`coefficients[i]` multiplies `x^i`).
    pub fn from_coefficients(coefficients: Vec<Real>) -> Self {
        Self { coefficients }
    }

    /// Fitted coefficients, constant term first.
    pub fn coefficients(&self) -> &[Real] {
        &self.coefficients
    }

    /// Consume and return the coefficients.
    pub fn into_coefficients(self) -> Vec<Real> {
        self.coefficients
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate the polynomial at `x`.
    pub fn value(&self, x: Real) -> Real {
        polynomial_value(&self.coefficients, x)
    }

    /// Residuals `y_j − p(x_j)`.
    pub fn residuals(&self, xs: &[Real], ys: &[Real]) -> Vec<Real> {
        xs.iter().zip(ys).map(|(&x, &y)| y - self.value(x)).collect()
    }

    /// R² statistic (coefficient of determination) on the given samples.
    pub fn r_squared(&self, xs: &[Real], ys: &[Real]) -> Real {
        let n = ys.len();
        if n == 0 {
            return 0.0;
        }
        let y_mean: Real = ys.iter().sum::<Real>() / n as Real;
        let ss_tot: Real = ys.iter().map(|&y| (y - y_mean).powi(2)).sum();
        let ss_res: Real = self.residuals(xs, ys).iter().map(|r| r * r).sum();
        if ss_tot == 0.0 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        }
    }
}

/// Fit and return the coefficients directly.
pub fn polynomial_fit(xs: &[Real], ys: &[Real], degree: usize) -> Result<Vec<Real>> {
    PolynomialRegression::fit(xs, ys, degree).map(PolynomialRegression::into_coefficients)
}

/// Evaluate `Σ coefficients[i] · x^i` (Horner's scheme).
pub fn polynomial_value(coefficients: &[Real], x: Real) -> Real {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use lsmc_core::Error;
    use proptest::prelude::*;

    #[test]
    fn collinear_points_recover_line() {
        let c = polynomial_fit(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0], 1).unwrap();
        assert_eq!(c.len(), 2);
        assert_abs_diff_eq!(c[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c[1], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn quadratic_fit() {
        // y = 1 - 2x + 0.5x²
        let xs: Vec<Real> = (0..30).map(|i| -5.0 + i as Real * 0.5).collect();
        let ys: Vec<Real> = xs.iter().map(|&x| 1.0 - 2.0 * x + 0.5 * x * x).collect();
        let reg = PolynomialRegression::fit(&xs, &ys, 2).unwrap();
        let c = reg.coefficients();
        assert_abs_diff_eq!(c[0], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(c[1], -2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(c[2], 0.5, epsilon = 1e-8);
        assert_abs_diff_eq!(reg.r_squared(&xs, &ys), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn noisy_fit_has_positive_residuals_and_r2_below_one() {
        let xs: Vec<Real> = (0..50).map(|i| i as Real * 0.1).collect();
        let noise = [0.01, -0.02, 0.015, -0.005, 0.03];
        let ys: Vec<Real> = xs
            .iter()
            .enumerate()
            .map(|(i, &x)| 1.0 + 2.0 * x + noise[i % noise.len()])
            .collect();
        let reg = PolynomialRegression::fit(&xs, &ys, 1).unwrap();
        assert_abs_diff_eq!(reg.coefficients()[1], 2.0, epsilon = 0.01);
        let r2 = reg.r_squared(&xs, &ys);
        assert!(r2 < 1.0 && r2 > 0.99, "R² = {r2}");
        assert_eq!(reg.residuals(&xs, &ys).len(), xs.len());
    }

    #[test]
    fn normal_matrix_layout() {
        let m = normal_equations(&[1.0, 2.0], &[3.0, 5.0], 1).unwrap();
        // [[S0, S1, T0], [S1, S2, T1]] = [[2, 3, 8], [3, 5, 13]]
        assert_eq!(m.row(0).unwrap(), vec![2.0, 3.0, 8.0]);
        assert_eq!(m.row(1).unwrap(), vec![3.0, 5.0, 13.0]);
    }

    #[test]
    fn degree_zero_is_the_mean() {
        let c = polynomial_fit(&[1.0, 2.0, 4.0], &[2.0, 4.0, 9.0], 0).unwrap();
        assert_abs_diff_eq!(c[0], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn horner_matches_direct_powers() {
        let c = [0.5, -1.0, 2.0, 0.25];
        let x: Real = 1.7;
        let direct: Real = c.iter().enumerate().map(|(i, &ci)| ci * x.powi(i as i32)).sum();
        assert_abs_diff_eq!(polynomial_value(&c, x), direct, epsilon = 1e-12);
        assert_eq!(polynomial_value(&[], x), 0.0);
        assert_eq!(PolynomialRegression::from_coefficients(c.to_vec()).degree(), 3);
    }

    #[test]
    fn too_few_distinct_samples_is_singular() {
        for xs in [vec![0.93], vec![0.93, 0.76], vec![1.0; 8], vec![36.5, 38.2]] {
            let ys = vec![0.1; xs.len()];
            let err = PolynomialRegression::fit(&xs, &ys, 2).unwrap_err();
            assert!(err.is_singular(), "{xs:?} gave {err:?}");
        }
    }

    #[test]
    fn degree_above_bound_is_rejected() {
        let xs = [1.0, 2.0, 3.0];
        assert!(normal_equations(&xs, &xs, MAX_DEGREE).is_ok());
        for degree in [MAX_DEGREE + 1, usize::MAX] {
            assert!(matches!(
                PolynomialRegression::fit(&xs, &xs, degree),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn invalid_samples() {
        assert!(matches!(
            polynomial_fit(&[1.0, 2.0], &[1.0], 1),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            polynomial_fit(&[], &[], 1),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            polynomial_fit(&[1.0, Real::NAN], &[1.0, 2.0], 1),
            Err(Error::InvalidInput(_))
        ));
    }

    proptest! {
        #[test]
        fn interpolates_when_degree_covers_unique_points(
            xs in prop::collection::btree_set(-40i32..40, 1..4),
            ys in prop::collection::vec(-5.0f64..5.0, 3),
        ) {
            let xs: Vec<Real> = xs.into_iter().map(|k| k as Real * 0.25).collect();
            let ys = &ys[..xs.len()];
            let degree = xs.len() - 1;
            let reg = PolynomialRegression::fit(&xs, ys, degree).unwrap();
            for (&x, &y) in xs.iter().zip(ys) {
                prop_assert!((reg.value(x) - y).abs() < 1e-6, "p({x}) = {} vs {y}", reg.value(x));
            }
        }
    }
}
