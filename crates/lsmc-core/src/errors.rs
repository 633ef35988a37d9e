//! Error types for lsmc.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! side is the single `thiserror`-derived [`Error`] enum. Pricing is a pure
//! computation, so nothing here is retryable: an error is terminal for the
//! call that produced it.

use thiserror::Error;

use crate::Real;

/// The top-level error type used throughout lsmc.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A linear system has a zero (or numerically zero) pivot after partial
    /// pivoting.
    #[error("singular matrix: pivot {pivot:e} in column {column} is indistinguishable from zero")]
    SingularMatrix {
        /// Elimination column at which the pivot vanished.
        column: usize,
        /// The offending pivot value.
        pivot: Real,
    },

    /// Input rejected before any numeric work was done.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },

    /// A computed result violated its postcondition.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),
}

impl Error {
    /// `true` for [`Error::SingularMatrix`].
    pub fn is_singular(&self) -> bool {
        matches!(self, Error::SingularMatrix { .. })
    }
}

/// Shorthand `Result` type used throughout lsmc.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Input validation guard.
///
/// Returns `Err(Error::InvalidInput(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use lsmc_core::{ensure, errors::Error};
/// fn positive(x: f64) -> lsmc_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidInput(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidInput(
                format!($($msg)*)
            ));
        }
    };
}

/// Postcondition guard.
///
/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use lsmc_core::{ensure_post, errors::Error};
/// fn halve(x: f64) -> lsmc_core::errors::Result<f64> {
///     let result = x / 2.0;
///     ensure_post!(result.is_finite(), "result must be finite, got {result}");
///     Ok(result)
/// }
/// assert!(halve(1.0).is_ok());
/// assert!(halve(f64::INFINITY).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}
