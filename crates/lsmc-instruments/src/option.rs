//! American option instrument.

use crate::instrument::{PricingEngine, PricingResults};
use crate::payoff::{OptionType, PlainVanillaPayoff};
use lsmc_core::{ensure, errors::Result, Real, Time};

/// Arguments handed to an American-option pricing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmericanOptionArguments {
    /// The payoff.
    pub payoff: PlainVanillaPayoff,
    /// Time to expiry in years; exercise is allowed at any time up to it.
    pub maturity: Time,
}

/// A plain vanilla option with American exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmericanOption {
    payoff: PlainVanillaPayoff,
    maturity: Time,
}

impl AmericanOption {
    /// Create a new American option.
    ///
    /// The strike must be finite and non-negative and the maturity positive.
    pub fn new(option_type: OptionType, strike: Real, maturity: Time) -> Result<Self> {
        ensure!(
            strike.is_finite() && strike >= 0.0,
            "strike must be finite and non-negative, got {strike}"
        );
        ensure!(
            maturity.is_finite() && maturity > 0.0,
            "maturity must be positive, got {maturity}"
        );
        Ok(Self {
            payoff: PlainVanillaPayoff::new(option_type, strike),
            maturity,
        })
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.payoff.strike
    }

    /// The option type (call/put).
    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type
    }

    /// The payoff.
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.payoff
    }

    /// Time to expiry in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Get the arguments for a pricing engine.
    pub fn arguments(&self) -> AmericanOptionArguments {
        AmericanOptionArguments {
            payoff: self.payoff,
            maturity: self.maturity,
        }
    }

    /// Price this option using the given engine.
    pub fn price(
        &self,
        engine: &dyn PricingEngine<AmericanOptionArguments>,
    ) -> Result<PricingResults> {
        engine.calculate(&self.arguments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsmc_core::Error;

    #[derive(Debug)]
    struct IntrinsicEngine {
        spot: Real,
    }

    impl PricingEngine<AmericanOptionArguments> for IntrinsicEngine {
        fn calculate(&self, args: &AmericanOptionArguments) -> Result<PricingResults> {
            Ok(PricingResults::from_npv(args.payoff.exercise_value(self.spot).max(0.0)))
        }
    }

    #[test]
    fn arguments_carry_contract_terms() {
        let option = AmericanOption::new(OptionType::Put, 40.0, 1.0).unwrap();
        let args = option.arguments();
        assert_eq!(args.payoff.strike, 40.0);
        assert_eq!(args.payoff.option_type, OptionType::Put);
        assert_eq!(args.maturity, 1.0);
    }

    #[test]
    fn prices_through_engine() {
        let option = AmericanOption::new(OptionType::Put, 40.0, 1.0).unwrap();
        let npv = option.price(&IntrinsicEngine { spot: 36.0 }).unwrap().npv;
        assert!((npv - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_terms() {
        assert!(matches!(
            AmericanOption::new(OptionType::Call, -1.0, 1.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(AmericanOption::new(OptionType::Call, 1.0, 0.0).is_err());
        assert!(AmericanOption::new(OptionType::Call, Real::NAN, 1.0).is_err());
    }
}
