//! Geometric Brownian motion.
//!
//! ```text
//! dS/S = μ dt + σ dW
//! ```
//!
//! Paths are stepped with the exact transition
//! `S(t+Δt) = S(t) · exp((μ − σ²/2)Δt + σ√Δt · z)`, so there is no
//! discretisation bias regardless of the step size. Prices stay strictly
//! positive.

use crate::stochastic_process::StochasticProcess1D;
use lsmc_core::{ensure, errors::Result, Rate, Real, Time, Volatility};

/// Geometric Brownian motion with constant drift and volatility.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricBrownianMotionProcess {
    x0: Real,
    mu: Rate,
    sigma: Volatility,
}

impl GeometricBrownianMotionProcess {
    /// Create a new GBM process.
    ///
    /// * `x0`: initial asset price, must be positive
    /// * `mu`: drift (growth rate)
    /// * `sigma`: volatility, must be non-negative
    pub fn new(x0: Real, mu: Rate, sigma: Volatility) -> Result<Self> {
        ensure!(
            x0.is_finite() && x0 > 0.0,
            "initial value must be positive, got {x0}"
        );
        ensure!(mu.is_finite(), "drift must be finite, got {mu}");
        ensure!(
            sigma.is_finite() && sigma >= 0.0,
            "volatility must be non-negative, got {sigma}"
        );
        Ok(Self { x0, mu, sigma })
    }

    /// Drift μ.
    pub fn mu(&self) -> Rate {
        self.mu
    }

    /// Volatility σ.
    pub fn sigma(&self) -> Volatility {
        self.sigma
    }
}

impl StochasticProcess1D for GeometricBrownianMotionProcess {
    fn x0(&self) -> Real {
        self.x0
    }

    fn drift_1d(&self, _t: Time, x: Real) -> Real {
        self.mu * x
    }

    fn diffusion_1d(&self, _t: Time, x: Real) -> Real {
        self.sigma * x
    }

    /// Exact expectation: `x · exp(μ · dt)`.
    fn expectation_1d(&self, _t: Time, x: Real, dt: Time) -> Real {
        x * (self.mu * dt).exp()
    }

    fn evolve_1d(&self, _t: Time, x: Real, dt: Time, dw: Real) -> Real {
        let drift = (self.mu - 0.5 * self.sigma * self.sigma) * dt;
        x * (drift + self.sigma * dt.sqrt() * dw).exp()
    }
}
