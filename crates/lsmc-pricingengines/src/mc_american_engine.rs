//! Monte Carlo engine for American options under geometric Brownian motion.
//!
//! Simulates risk-neutral GBM paths on a uniform grid of `steps` intervals
//! up to the option's maturity and prices them with the
//! [`LongstaffSchwartzPricer`]. The annual risk-free rate `r` becomes the
//! per-step rate `r · Δt` that the pricer discounts with.

use crate::longstaff_schwartz::{LongstaffSchwartzPricer, LsmResults};
use crate::settings::LongstaffSchwartzSettings;
use lsmc_core::{ensure, errors::Result, Rate, Real, Volatility};
use lsmc_instruments::{AmericanOption, AmericanOptionArguments, PricingEngine, PricingResults};
use lsmc_methods::PathGenerator;
use lsmc_processes::{GeometricBrownianMotionProcess, StochasticProcess1D};
use tracing::debug;

/// Least-squares Monte Carlo engine for American vanilla options.
#[derive(Debug, Clone)]
pub struct McAmericanEngine {
    process: GeometricBrownianMotionProcess,
    risk_free_rate: Rate,
    steps: usize,
    paths: usize,
    seed: u64,
    settings: LongstaffSchwartzSettings,
}

impl McAmericanEngine {
    /// Create an engine with default [`LongstaffSchwartzSettings`].
    ///
    /// * `spot`: today's price of the underlying
    /// * `risk_free_rate`: continuously compounded annual rate, also the
    ///   drift of the simulated process
    /// * `volatility`: annual volatility
    /// * `steps`: exercise dates per path (uniformly spaced)
    /// * `paths`: number of simulated paths
    /// * `seed`: RNG seed
    pub fn new(
        spot: Real,
        risk_free_rate: Rate,
        volatility: Volatility,
        steps: usize,
        paths: usize,
        seed: u64,
    ) -> Result<Self> {
        let process = GeometricBrownianMotionProcess::new(spot, risk_free_rate, volatility)?;
        ensure!(steps > 0, "at least one time step is required");
        ensure!(paths > 0, "at least one path is required");
        Ok(Self {
            process,
            risk_free_rate,
            steps,
            paths,
            seed,
            settings: LongstaffSchwartzSettings::default(),
        })
    }

    /// Replace the pricer settings.
    pub fn with_settings(mut self, settings: LongstaffSchwartzSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The simulated process.
    pub fn process(&self) -> &GeometricBrownianMotionProcess {
        &self.process
    }

    /// The pricer settings.
    pub fn settings(&self) -> &LongstaffSchwartzSettings {
        &self.settings
    }
}

impl PricingEngine<AmericanOptionArguments> for McAmericanEngine {
    fn calculate(&self, args: &AmericanOptionArguments) -> Result<PricingResults> {
        let results = simulate_and_price(
            &self.process,
            args,
            self.risk_free_rate,
            self.steps,
            self.paths,
            self.seed,
            self.settings,
        )?;
        Ok(PricingResults::from_npv(results.price)
            .with_error_estimate(results.error_estimate)
            .with_result("european_npv", results.european_value)
            .with_result("early_exercise_premium", results.early_exercise_premium))
    }
}

/// Convenience function: least-squares Monte Carlo price of an American
/// option with default settings.
///
/// `process` should carry the risk-neutral drift. Returns
/// `(price, std_error)`.
pub fn mc_american_price(
    process: &dyn StochasticProcess1D,
    option: &AmericanOption,
    risk_free_rate: Rate,
    steps: usize,
    n_paths: usize,
    seed: u64,
) -> Result<(Real, Real)> {
    let results = simulate_and_price(
        process,
        &option.arguments(),
        risk_free_rate,
        steps,
        n_paths,
        seed,
        LongstaffSchwartzSettings::default(),
    )?;
    Ok((results.price, results.error_estimate))
}

fn simulate_and_price(
    process: &dyn StochasticProcess1D,
    args: &AmericanOptionArguments,
    risk_free_rate: Rate,
    steps: usize,
    n_paths: usize,
    seed: u64,
    settings: LongstaffSchwartzSettings,
) -> Result<LsmResults> {
    ensure!(
        risk_free_rate.is_finite(),
        "risk-free rate must be finite, got {risk_free_rate}"
    );
    let mut generator = PathGenerator::new(process, args.maturity, steps, seed)?;
    let paths = generator.generate(n_paths)?;
    let step_rate = risk_free_rate * generator.dt();
    debug!(
        option = %args.payoff.option_type,
        strike = args.payoff.strike,
        maturity = args.maturity,
        step_rate,
        "pricing American option by least squares"
    );
    let mut pricer =
        LongstaffSchwartzPricer::with_settings(step_rate, args.payoff.strike, paths, settings)?;
    pricer.price_with_diagnostics(args.payoff.option_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european::black_scholes_price;
    use crate::settings::ContinuationTarget;
    use lsmc_instruments::OptionType;

    fn put_36_40() -> AmericanOption {
        AmericanOption::new(OptionType::Put, 40.0, 1.0).unwrap()
    }

    #[test]
    fn pathwise_put_matches_published_value() {
        // Longstaff-Schwartz (2001), table 1: S=36, σ=0.2, T=1 → 4.478
        let engine = McAmericanEngine::new(36.0, 0.06, 0.2, 50, 4000, 42)
            .unwrap()
            .with_settings(
                LongstaffSchwartzSettings::default()
                    .with_continuation_target(ContinuationTarget::Pathwise),
            );
        let results = put_36_40().price(&engine).unwrap();
        let european = black_scholes_price(OptionType::Put, 36.0, 40.0, 0.06, 0.2, 1.0);

        assert!((results.npv - 4.478).abs() < 0.25, "npv {}", results.npv);
        assert!(results.npv > european, "npv {} vs european {european}", results.npv);
        assert!(results.error_estimate.unwrap() > 0.0);
        assert!(results.result("early_exercise_premium").unwrap() > 0.0);
        let mc_european = results.result("european_npv").unwrap();
        assert!((mc_european - european).abs() < 0.3, "mc european {mc_european}");
    }

    #[test]
    fn next_step_put_is_bounded() {
        let engine = McAmericanEngine::new(36.0, 0.06, 0.2, 50, 4000, 7).unwrap();
        let npv = put_36_40().price(&engine).unwrap().npv;
        assert!(npv > 3.5 && npv < 4.73, "npv {npv}");
    }

    #[test]
    fn convenience_function_is_reproducible() {
        let process = GeometricBrownianMotionProcess::new(36.0, 0.06, 0.2).unwrap();
        let option = put_36_40();
        let a = mc_american_price(&process, &option, 0.06, 10, 500, 3).unwrap();
        let b = mc_american_price(&process, &option, 0.06, 10, 500, 3).unwrap();
        assert_eq!(a, b);
        assert!(a.0 > 0.0 && a.1 > 0.0);
    }

    #[test]
    fn engine_builds_risk_neutral_process() {
        let settings =
            LongstaffSchwartzSettings::default().with_continuation_target(ContinuationTarget::Pathwise);
        let engine = McAmericanEngine::new(36.0, 0.06, 0.2, 50, 100, 1)
            .unwrap()
            .with_settings(settings);
        assert_eq!(engine.process().x0(), 36.0);
        assert_eq!(engine.process().mu(), 0.06);
        assert_eq!(engine.process().sigma(), 0.2);
        assert_eq!(engine.settings(), &settings);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(McAmericanEngine::new(-36.0, 0.06, 0.2, 50, 100, 1).is_err());
        assert!(McAmericanEngine::new(36.0, 0.06, 0.2, 0, 100, 1).is_err());
        assert!(McAmericanEngine::new(36.0, 0.06, 0.2, 50, 0, 1).is_err());
        let process = GeometricBrownianMotionProcess::new(36.0, 0.06, 0.2).unwrap();
        assert!(mc_american_price(&process, &put_36_40(), Real::NAN, 10, 10, 1).is_err());
    }
}
