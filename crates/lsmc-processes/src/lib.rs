//! # lsmc-processes
//!
//! One-dimensional stochastic processes that drive path simulation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod geometric_brownian_motion;
pub mod stochastic_process;

pub use geometric_brownian_motion::GeometricBrownianMotionProcess;
pub use stochastic_process::StochasticProcess1D;
