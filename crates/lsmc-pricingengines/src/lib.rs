//! # lsmc-pricingengines
//!
//! American option pricing by least-squares Monte Carlo.
//!
//! ## Engines
//!
//! - [`LongstaffSchwartzPricer`]: backward induction over a given path matrix
//! - [`McAmericanEngine`]: simulates GBM paths and prices through the pricer
//! - [`black_scholes_price`]: closed-form European value, a lower bound for
//!   the American put

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european;
pub mod longstaff_schwartz;
pub mod mc_american_engine;
pub mod settings;

pub use analytic_european::black_scholes_price;
pub use longstaff_schwartz::{ExerciseStepReport, LongstaffSchwartzPricer, LsmResults};
pub use mc_american_engine::{mc_american_price, McAmericanEngine};
pub use settings::{ContinuationTarget, LongstaffSchwartzSettings, SingularRegressionPolicy};
