//! # lsmc-instruments
//!
//! Option payoffs, the American option instrument and the pricing-engine
//! interface it is priced through.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod instrument;
pub mod option;
pub mod payoff;

pub use instrument::{PricingEngine, PricingResults};
pub use option::{AmericanOption, AmericanOptionArguments};
pub use payoff::{exercise_value, is_in_the_money, OptionType, Payoff, PlainVanillaPayoff};
