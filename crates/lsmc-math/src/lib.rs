//! # lsmc-math
//!
//! Numerical building blocks for the pricer: a dense [`Matrix`] container
//! (over nalgebra), Gaussian elimination, polynomial least squares, the
//! normal distribution (via statrs), Mersenne-Twister random numbers and a
//! running statistics accumulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Standard normal pdf / cdf / inverse cdf.
pub mod distributions;

/// Gaussian elimination with partial pivoting.
pub mod linear_solver;

/// Dense two-dimensional matrix newtype.
pub mod matrix;

/// Polynomial least-squares regression (normal equations).
pub mod polynomial_regression;

/// Random number generators.
pub mod random_numbers;

/// Running sample statistics.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{inverse_normal_cdf, normal_cdf, normal_pdf};
pub use linear_solver::{solve_augmented, GaussianElimination, DEFAULT_PIVOT_TOLERANCE};
pub use matrix::Matrix;
pub use polynomial_regression::{
    normal_equations, polynomial_fit, polynomial_value, PolynomialRegression, MAX_DEGREE,
};
pub use random_numbers::{InverseCumulativeNormalRng, MersenneTwisterUniformRng};
pub use statistics::Statistics;
