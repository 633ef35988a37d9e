//! # lsmc
//!
//! American option pricing by Longstaff-Schwartz least-squares Monte Carlo.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `lsmc-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use lsmc::instruments::{AmericanOption, OptionType};
//! use lsmc::pricingengines::McAmericanEngine;
//!
//! let option = AmericanOption::new(OptionType::Put, 40.0, 1.0)?;
//! let engine = McAmericanEngine::new(36.0, 0.06, 0.2, 50, 2_000, 42)?;
//! let results = option.price(&engine)?;
//! assert!(results.npv > 3.0 && results.npv < 5.0);
//! # Ok::<(), lsmc::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use lsmc_core as core;

/// Linear solver, polynomial regression, RNG, statistics.
pub use lsmc_math as math;

/// Stochastic process definitions.
pub use lsmc_processes as processes;

/// Monte Carlo path simulation.
pub use lsmc_methods as methods;

/// Payoffs, the American option and the pricing-engine trait.
pub use lsmc_instruments as instruments;

/// Longstaff-Schwartz pricer and Monte Carlo engine.
pub use lsmc_pricingengines as pricingengines;
