//! Standard normal distribution helpers, built on `statrs`' error functions.

use lsmc_core::Real;
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{PI, SQRT_2};

/// The standard normal probability density function.
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The standard normal cumulative distribution function Φ(x).
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

/// The inverse standard normal CDF, `Φ⁻¹(p)` for `p ∈ (0, 1)`.
///
/// Written in terms of `erfc⁻¹` rather than `erf⁻¹(2p − 1)` to keep precision
/// in the lower tail. Returns ±∞ at the end points and NaN outside `[0, 1]`.
pub fn inverse_normal_cdf(p: Real) -> Real {
    if !(0.0..=1.0).contains(&p) {
        return Real::NAN;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}
