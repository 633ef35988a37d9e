//! Longstaff-Schwartz least-squares Monte Carlo pricer.
//!
//! Given a matrix of simulated prices (one row per path, column 0 = today),
//! the pricer works backwards from expiry. At each step it regresses the
//! discounted future cash flow of the in-the-money paths on their spot price
//! with a polynomial of the configured degree, and exercises wherever the
//! immediate payoff is at least the fitted continuation value.
//!
//! Every path holds at most one cash flow. Exercising at step `t` moves the
//! path's cash flow from its current exercise step to `t`, so the cash-flow
//! matrix never carries two payments on a row.
//!
//! The rate is per time step: the discount factor between adjacent columns
//! is `exp(-rate)`.
//!
//! # References
//! Longstaff, F. A. and Schwartz, E. S. (2001), *Valuing American Options by
//! Simulation: A Simple Least-Squares Approach*, RFS 14(1).

use crate::settings::{ContinuationTarget, LongstaffSchwartzSettings, SingularRegressionPolicy};
use lsmc_core::{ensure, ensure_post, errors::Result, DiscountFactor, Price, Rate, Real};
use lsmc_instruments::{exercise_value, is_in_the_money, OptionType};
use lsmc_math::{GaussianElimination, Matrix, PolynomialRegression, Statistics};
use lsmc_methods::PathMatrix;
use tracing::{debug, instrument, warn};

/// What happened at one exercise date during backward induction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseStepReport {
    /// Time index.
    pub step: usize,
    /// Paths in the money at this step.
    pub in_the_money: usize,
    /// Paths exercised at this step.
    pub exercised: usize,
    /// The regression was singular and the step was handled by the
    /// [`SingularRegressionPolicy`].
    pub singular: bool,
}

/// Price and diagnostics of one pricing run.
#[derive(Debug, Clone, PartialEq)]
pub struct LsmResults {
    /// Option value.
    pub price: Price,
    /// Standard error of the per-path discounted cash flow.
    pub error_estimate: Real,
    /// Value of holding every path to expiry, on the same paths.
    pub european_value: Price,
    /// `price − european_value`.
    pub early_exercise_premium: Real,
    /// One report per exercise date before expiry, in time order.
    pub steps: Vec<ExerciseStepReport>,
}

/// American option pricer over a fixed path matrix.
///
/// ```
/// use lsmc_instruments::OptionType;
/// use lsmc_methods::PathMatrix;
/// use lsmc_pricingengines::LongstaffSchwartzPricer;
///
/// let paths = PathMatrix::from_rows(&[
///     [1.00, 1.09, 1.08, 1.34],
///     [1.00, 1.16, 1.26, 1.54],
///     [1.00, 1.22, 1.07, 1.03],
///     [1.00, 0.93, 0.97, 0.92],
///     [1.00, 1.11, 1.56, 1.52],
///     [1.00, 0.76, 0.77, 0.90],
///     [1.00, 0.92, 0.84, 1.01],
///     [1.00, 0.88, 1.22, 1.34],
/// ])?;
/// let mut pricer = LongstaffSchwartzPricer::new(0.06, 1.1, paths)?;
/// let price = pricer.price(OptionType::Put)?;
/// assert!((price - 0.1144).abs() < 1e-3);
/// # Ok::<(), lsmc_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LongstaffSchwartzPricer {
    rate: Rate,
    strike: Real,
    discount: DiscountFactor,
    paths: PathMatrix,
    settings: LongstaffSchwartzSettings,
    solver: GaussianElimination,
    cash_flows: Matrix,
    exercise_steps: Vec<usize>,
}

impl LongstaffSchwartzPricer {
    /// Create a pricer with default settings.
    ///
    /// * `rate`: interest rate per time step
    /// * `strike`: strike price, finite and non-negative
    /// * `paths`: simulated prices
    pub fn new(rate: Rate, strike: Real, paths: PathMatrix) -> Result<Self> {
        Self::with_settings(rate, strike, paths, LongstaffSchwartzSettings::default())
    }

    /// Create a pricer with explicit settings.
    pub fn with_settings(
        rate: Rate,
        strike: Real,
        paths: PathMatrix,
        settings: LongstaffSchwartzSettings,
    ) -> Result<Self> {
        validate_terms(rate, strike)?;
        let solver = settings.solver()?;
        let (cash_flows, exercise_steps) = blank_state(&paths);
        Ok(Self {
            rate,
            strike,
            discount: (-rate).exp(),
            paths,
            settings,
            solver,
            cash_flows,
            exercise_steps,
        })
    }

    /// Replace rate, strike and paths, resetting all pricing state.
    ///
    /// On error the pricer is left exactly as it was.
    pub fn reprice(&mut self, rate: Rate, strike: Real, paths: PathMatrix) -> Result<()> {
        validate_terms(rate, strike)?;
        let (cash_flows, exercise_steps) = blank_state(&paths);
        self.rate = rate;
        self.strike = strike;
        self.discount = (-rate).exp();
        self.paths = paths;
        self.cash_flows = cash_flows;
        self.exercise_steps = exercise_steps;
        Ok(())
    }

    /// Per-step interest rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// One-step discount factor `exp(-rate)`.
    pub fn discount_factor(&self) -> DiscountFactor {
        self.discount
    }

    /// The simulated prices.
    pub fn paths(&self) -> &PathMatrix {
        &self.paths
    }

    /// The pricer settings.
    pub fn settings(&self) -> &LongstaffSchwartzSettings {
        &self.settings
    }

    /// Cash flows of the last successful pricing run (zeros before the first).
    pub fn cash_flows(&self) -> &Matrix {
        &self.cash_flows
    }

    /// Step at which each path receives a positive cash flow in the last
    /// successful pricing run, `None` if it never does.
    pub fn exercise_steps(&self) -> Vec<Option<usize>> {
        self.exercise_steps
            .iter()
            .enumerate()
            .map(|(p, &tau)| (self.cash_flows[(p, tau)] > 0.0).then_some(tau))
            .collect()
    }

    /// Price of the American option.
    pub fn price(&mut self, option_type: OptionType) -> Result<Price> {
        self.price_with_diagnostics(option_type).map(|r| r.price)
    }

    /// Price of the American call.
    pub fn price_call(&mut self) -> Result<Price> {
        self.price(OptionType::Call)
    }

    /// Price of the American put.
    pub fn price_put(&mut self) -> Result<Price> {
        self.price(OptionType::Put)
    }

    /// Price with per-step diagnostics.
    ///
    /// Recomputes from scratch; the stored cash flows and exercise steps are
    /// replaced only when the run succeeds.
    #[instrument(level = "debug", skip(self))]
    pub fn price_with_diagnostics(&mut self, option_type: OptionType) -> Result<LsmResults> {
        let n_paths = self.paths.num_paths();
        let last = self.paths.steps();
        let discounts = discount_powers(self.discount, last);
        let (mut cash_flows, mut exercise_steps) = blank_state(&self.paths);

        for (p, &spot) in self.paths.terminal_prices().iter().enumerate() {
            cash_flows[(p, last)] = exercise_value(option_type, spot, self.strike).max(0.0);
        }

        let mut reports = Vec::with_capacity(last);
        for t in (0..last).rev() {
            let spots = self.paths.prices_at(t)?;
            let itm: Vec<usize> = (0..n_paths)
                .filter(|&p| is_in_the_money(option_type, spots[p], self.strike))
                .collect();
            let mut report = ExerciseStepReport {
                step: t,
                in_the_money: itm.len(),
                exercised: 0,
                singular: false,
            };
            if itm.is_empty() {
                debug!(step = t, "no path in the money");
                reports.push(report);
                continue;
            }

            let xs: Vec<Real> = itm.iter().map(|&p| spots[p]).collect();
            let ys: Vec<Real> = itm
                .iter()
                .map(|&p| {
                    let tau = match self.settings.continuation_target {
                        ContinuationTarget::NextStep => t + 1,
                        ContinuationTarget::Pathwise => exercise_steps[p],
                    };
                    cash_flows[(p, tau)] * discounts[tau - t]
                })
                .collect();

            let fit = match PolynomialRegression::fit_with(
                &xs,
                &ys,
                self.settings.degree,
                &self.solver,
            ) {
                Ok(fit) => Some(fit),
                Err(err) if err.is_singular() => {
                    report.singular = true;
                    match self.settings.singular_policy {
                        SingularRegressionPolicy::Propagate => return Err(err),
                        SingularRegressionPolicy::SkipStep => {
                            warn!(step = t, samples = xs.len(), error = %err, "singular regression, step skipped");
                            reports.push(report);
                            continue;
                        }
                        SingularRegressionPolicy::ExerciseInTheMoney => {
                            warn!(step = t, samples = xs.len(), error = %err, "singular regression, exercising in the money");
                            None
                        }
                    }
                }
                Err(err) => return Err(err),
            };

            for (&p, &spot) in itm.iter().zip(&xs) {
                let immediate = exercise_value(option_type, spot, self.strike);
                let continuation = fit.as_ref().map_or(0.0, |f| f.value(spot));
                if immediate >= continuation {
                    cash_flows[(p, exercise_steps[p])] = 0.0;
                    cash_flows[(p, t)] = immediate;
                    exercise_steps[p] = t;
                    report.exercised += 1;
                }
            }
            debug!(
                step = t,
                in_the_money = report.in_the_money,
                exercised = report.exercised,
                "backward induction step"
            );
            reports.push(report);
        }
        reports.reverse();

        let mut stats = Statistics::new();
        let mut total = 0.0;
        for (p, &tau) in exercise_steps.iter().enumerate() {
            let value = cash_flows[(p, tau)] * discounts[tau];
            total += value;
            stats.add(value);
        }
        let price = total / n_paths as Real;
        ensure_post!(price.is_finite(), "price must be finite, got {price}");

        let european_value = self
            .paths
            .terminal_prices()
            .iter()
            .map(|&s| exercise_value(option_type, s, self.strike).max(0.0))
            .sum::<Real>()
            * discounts[last]
            / n_paths as Real;

        debug!(price, european_value, paths = n_paths, steps = last, "priced");

        self.cash_flows = cash_flows;
        self.exercise_steps = exercise_steps;
        Ok(LsmResults {
            price,
            error_estimate: stats.error_estimate().unwrap_or(0.0),
            european_value,
            early_exercise_premium: price - european_value,
            steps: reports,
        })
    }
}

fn validate_terms(rate: Rate, strike: Real) -> Result<()> {
    ensure!(rate.is_finite(), "rate must be finite, got {rate}");
    ensure!(
        strike.is_finite() && strike >= 0.0,
        "strike must be finite and non-negative, got {strike}"
    );
    Ok(())
}

/// Zero cash flows, every path pointing at the last column.
fn blank_state(paths: &PathMatrix) -> (Matrix, Vec<usize>) {
    (
        Matrix::zeros(paths.num_paths(), paths.num_points()),
        vec![paths.steps(); paths.num_paths()],
    )
}

/// `[1, df, df², …, df^steps]`
fn discount_powers(df: DiscountFactor, steps: usize) -> Vec<DiscountFactor> {
    std::iter::successors(Some(1.0), |d| Some(d * df))
        .take(steps + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use lsmc_core::Error;

    fn reference_paths() -> PathMatrix {
        PathMatrix::from_rows(&[
            [1.00, 1.09, 1.08, 1.34],
            [1.00, 1.16, 1.26, 1.54],
            [1.00, 1.22, 1.07, 1.03],
            [1.00, 0.93, 0.97, 0.92],
            [1.00, 1.11, 1.56, 1.52],
            [1.00, 0.76, 0.77, 0.90],
            [1.00, 0.92, 0.84, 1.01],
            [1.00, 0.88, 1.22, 1.34],
        ])
        .unwrap()
    }

    #[test]
    fn reference_put_cash_flows() {
        let mut pricer = LongstaffSchwartzPricer::new(0.06, 1.1, reference_paths()).unwrap();
        let price = pricer.price_put().unwrap();
        assert_abs_diff_eq!(price, 0.114_434_33, epsilon = 1e-8);

        let expected = [
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.07],
            [0.0, 0.17, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.34, 0.0, 0.0],
            [0.0, 0.18, 0.0, 0.0],
            [0.0, 0.22, 0.0, 0.0],
        ];
        let cf = pricer.cash_flows();
        for (p, row) in expected.iter().enumerate() {
            for (t, &v) in row.iter().enumerate() {
                assert_abs_diff_eq!(cf[(p, t)], v, epsilon = 1e-12);
            }
        }
        assert_eq!(
            pricer.exercise_steps(),
            vec![None, None, Some(3), Some(1), None, Some(1), Some(1), Some(1)]
        );
    }

    #[test]
    fn reference_put_diagnostics() {
        let mut pricer = LongstaffSchwartzPricer::new(0.06, 1.1, reference_paths()).unwrap();
        let r = pricer.price_with_diagnostics(OptionType::Put).unwrap();
        assert_abs_diff_eq!(r.european_value, 0.056_380_74, epsilon = 1e-8);
        assert_abs_diff_eq!(r.early_exercise_premium, 0.058_053_59, epsilon = 1e-8);
        assert_abs_diff_eq!(r.error_estimate, 0.041_935_34, epsilon = 1e-8);

        let summary: Vec<_> = r
            .steps
            .iter()
            .map(|s| (s.step, s.in_the_money, s.exercised, s.singular))
            .collect();
        assert_eq!(
            summary,
            vec![(0, 8, 0, true), (1, 5, 4, false), (2, 5, 3, false)]
        );
    }

    #[test]
    fn pathwise_target_agrees_on_reference() {
        let settings =
            LongstaffSchwartzSettings::default().with_continuation_target(ContinuationTarget::Pathwise);
        let mut pricer =
            LongstaffSchwartzPricer::with_settings(0.06, 1.1, reference_paths(), settings).unwrap();
        assert_abs_diff_eq!(pricer.price_put().unwrap(), 0.114_434_33, epsilon = 1e-8);
    }

    #[test]
    fn singular_policies() {
        let propagate =
            LongstaffSchwartzSettings::default().with_singular_policy(SingularRegressionPolicy::Propagate);
        let mut pricer =
            LongstaffSchwartzPricer::with_settings(0.06, 1.1, reference_paths(), propagate).unwrap();
        assert!(matches!(
            pricer.price_put(),
            Err(Error::SingularMatrix { .. })
        ));
        // a failed run leaves no partial cash flows behind
        assert_eq!(pricer.cash_flows().sum(), 0.0);

        let exercise = LongstaffSchwartzSettings::default()
            .with_singular_policy(SingularRegressionPolicy::ExerciseInTheMoney);
        let mut pricer =
            LongstaffSchwartzPricer::with_settings(0.06, 1.1, reference_paths(), exercise).unwrap();
        // every path starts in the money at 1.0 and exercises immediately
        assert_abs_diff_eq!(pricer.price_put().unwrap(), 0.1, epsilon = 1e-12);
        assert!(pricer.exercise_steps().iter().all(|&s| s == Some(0)));
    }

    #[test]
    fn single_column_is_intrinsic() {
        let paths = PathMatrix::from_rows(&[[0.9], [1.3]]).unwrap();
        let mut pricer = LongstaffSchwartzPricer::new(0.05, 1.0, paths).unwrap();
        assert_abs_diff_eq!(pricer.price_put().unwrap(), 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(pricer.price_call().unwrap(), 0.15, epsilon = 1e-12);
        let r = pricer.price_with_diagnostics(OptionType::Call).unwrap();
        assert!(r.steps.is_empty());
        assert_abs_diff_eq!(r.error_estimate, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn call_then_put_recomputes() {
        let mut pricer = LongstaffSchwartzPricer::new(0.06, 1.1, reference_paths()).unwrap();
        let put = pricer.price_put().unwrap();
        pricer.price_call().unwrap();
        assert_eq!(pricer.price_put().unwrap(), put);
    }

    #[test]
    fn reprice_is_all_or_nothing() {
        let mut pricer = LongstaffSchwartzPricer::new(0.06, 1.1, reference_paths()).unwrap();
        let before = pricer.price_put().unwrap();

        let other = PathMatrix::from_rows(&[[1.0, 0.5]]).unwrap();
        assert!(pricer.reprice(Real::NAN, 1.1, other.clone()).is_err());
        assert!(pricer.reprice(0.06, -1.0, other.clone()).is_err());
        assert_eq!(pricer.rate(), 0.06);
        assert_abs_diff_eq!(pricer.discount_factor(), (-0.06_f64).exp(), epsilon = 1e-15);
        assert_eq!(pricer.paths().num_paths(), 8);
        assert_eq!(pricer.price_put().unwrap(), before);

        pricer.reprice(0.0, 1.0, other).unwrap();
        assert_eq!(pricer.cash_flows().rows(), 1);
        assert_abs_diff_eq!(pricer.price_put().unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(LongstaffSchwartzPricer::new(Real::INFINITY, 1.0, reference_paths()).is_err());
        assert!(LongstaffSchwartzPricer::new(0.06, Real::NAN, reference_paths()).is_err());
        let bad = LongstaffSchwartzSettings::default().with_pivot_tolerance(-1.0);
        assert!(LongstaffSchwartzPricer::with_settings(0.06, 1.1, reference_paths(), bad).is_err());
    }

    #[test]
    fn discount_powers_grid() {
        let d = discount_powers(0.5, 3);
        assert_eq!(d, vec![1.0, 0.5, 0.25, 0.125]);
    }
}
