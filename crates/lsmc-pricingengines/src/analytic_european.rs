//! Black-Scholes closed form for European options.
//!
//! Used as a benchmark for the Monte Carlo American engine: without
//! dividends the American call equals the European call, and the American
//! put is bounded below by the European put.

use lsmc_core::{Price, Rate, Real, Time, Volatility};
use lsmc_instruments::OptionType;
use lsmc_math::distributions::normal_cdf;

/// Black-Scholes price of a European option on a non-dividend-paying asset.
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
///
/// Returns the discounted intrinsic value when `T ≤ 0` or `σ = 0`.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Price {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let df = (-risk_free_rate * t).exp();
    let std_dev = volatility * t.sqrt();
    if std_dev <= 1e-15 {
        return (phi * (spot - strike * df)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (risk_free_rate + 0.5 * volatility * volatility) * t) / std_dev;
    let d2 = d1 - std_dev;
    phi * (spot * normal_cdf(phi * d1) - strike * df * normal_cdf(phi * d2))
}
