//! # lsmc-methods
//!
//! Monte Carlo simulation: path containers and path generation.
//!
//! * [`monte_carlo`]: [`Path`], [`PathMatrix`], [`PathGenerator`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: sample paths and path matrices.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{Path, PathGenerator, PathMatrix};
