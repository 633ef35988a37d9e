//! Configuration of the Longstaff-Schwartz pricer.

use lsmc_core::{ensure, errors::Result, Real};
use lsmc_math::{GaussianElimination, DEFAULT_PIVOT_TOLERANCE, MAX_DEGREE};

/// Regression target used to estimate the continuation value at step `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContinuationTarget {
    /// The cash flow at `t + 1` discounted one step.
    #[default]
    NextStep,
    /// The cash flow at the step where the path currently exercises,
    /// discounted back to `t`.
    Pathwise,
}

/// What to do when the regression at some step is singular.
///
/// With a quadratic fit this happens whenever fewer than three distinct spot
/// levels are in the money, and always at step 0 when every path starts from
/// the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SingularRegressionPolicy {
    /// No exercise at that step.
    #[default]
    SkipStep,
    /// Continuation taken as zero, so every in-the-money path exercises.
    ExerciseInTheMoney,
    /// Fail the pricing call with the solver's `SingularMatrix` error.
    Propagate,
}

/// Settings of a [`LongstaffSchwartzPricer`](crate::LongstaffSchwartzPricer).
///
/// ```
/// use lsmc_pricingengines::{ContinuationTarget, LongstaffSchwartzSettings};
///
/// let settings = LongstaffSchwartzSettings::default()
///     .with_degree(3)
///     .with_continuation_target(ContinuationTarget::Pathwise);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LongstaffSchwartzSettings {
    /// Degree of the monomial basis `1, x, …, x^degree`, at most
    /// [`MAX_DEGREE`].
    pub degree: usize,
    /// Regression target.
    pub continuation_target: ContinuationTarget,
    /// Handling of singular regressions.
    pub singular_policy: SingularRegressionPolicy,
    /// Relative pivot tolerance of the linear solver.
    pub pivot_tolerance: Real,
}

impl Default for LongstaffSchwartzSettings {
    fn default() -> Self {
        Self {
            degree: 2,
            continuation_target: ContinuationTarget::default(),
            singular_policy: SingularRegressionPolicy::default(),
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl LongstaffSchwartzSettings {
    /// Set the polynomial degree.
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Set the regression target.
    pub fn with_continuation_target(mut self, target: ContinuationTarget) -> Self {
        self.continuation_target = target;
        self
    }

    /// Set the singular-regression policy.
    pub fn with_singular_policy(mut self, policy: SingularRegressionPolicy) -> Self {
        self.singular_policy = policy;
        self
    }

    /// Set the solver's relative pivot tolerance.
    pub fn with_pivot_tolerance(mut self, tolerance: Real) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Check the settings.
    pub fn validate(&self) -> Result<()> {
        self.solver().map(|_| ())
    }

    pub(crate) fn solver(&self) -> Result<GaussianElimination> {
        ensure!(
            self.degree <= MAX_DEGREE,
            "polynomial degree must be at most {MAX_DEGREE}, got {}",
            self.degree
        );
        GaussianElimination::new(self.pivot_tolerance)
    }
}
