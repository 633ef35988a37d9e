//! Option payoffs.
//!
//! A single signed formula covers both option types: with `φ = +1` for a
//! call and `φ = −1` for a put, the exercise value is `φ(S − K)`. The pricer
//! uses the unfloored [`exercise_value`] for exercise decisions and the
//! floored [`Payoff::value`] at expiry.

use lsmc_core::Real;
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Value of exercising immediately at `spot`: `S − K` for a call, `K − S`
/// for a put. Not floored at zero.
#[inline]
pub fn exercise_value(option_type: OptionType, spot: Real, strike: Real) -> Real {
    option_type.sign() * (spot - strike)
}

/// Strictly positive exercise value (`S > K` for a call, `S < K` for a put).
#[inline]
pub fn is_in_the_money(option_type: OptionType, spot: Real, strike: Real) -> bool {
    exercise_value(option_type, spot, strike) > 0.0
}

/// An option payoff as a function of the underlying price.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at exercise/expiry.
    fn value(&self, price: Real) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> String {
        self.name().to_string()
    }
}

/// `max(φ(S − K), 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// Unfloored exercise value at `spot`.
    pub fn exercise_value(&self, spot: Real) -> Real {
        exercise_value(self.option_type, spot, self.strike)
    }

    /// Whether `spot` is strictly in the money.
    pub fn is_in_the_money(&self, spot: Real) -> bool {
        is_in_the_money(self.option_type, spot, self.strike)
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Real {
        self.exercise_value(price).max(0.0)
    }

    fn name(&self) -> &str {
        "Vanilla"
    }

    fn description(&self) -> String {
        format!("{} {} @ {}", self.name(), self.option_type, self.strike)
    }
}
