//! `StochasticProcess1D`: the process interface consumed by path generators.
//!
//! A process `dX = μ(t,X) dt + σ(t,X) dW` is described by its drift and
//! diffusion; `evolve_1d` advances the state over one time step given a
//! standard-normal shock. The default discretisation is Euler; processes with
//! a known transition law override `evolve_1d`.

use lsmc_core::{Real, Time};

/// A one-dimensional stochastic process.
pub trait StochasticProcess1D: std::fmt::Debug + Send + Sync {
    /// Initial value of the process.
    fn x0(&self) -> Real;

    /// Drift `μ(t, x)`.
    fn drift_1d(&self, t: Time, x: Real) -> Real;

    /// Diffusion `σ(t, x)`.
    fn diffusion_1d(&self, t: Time, x: Real) -> Real;

    /// Expected value `E[x(t+Δt) | x(t) = x]`.
    fn expectation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        x + self.drift_1d(t, x) * dt
    }

    /// Standard deviation `σ(t,x) · √Δt`.
    fn std_deviation_1d(&self, t: Time, x: Real, dt: Time) -> Real {
        self.diffusion_1d(t, x) * dt.sqrt()
    }

    /// Advance `x` from `t` to `t + dt` with standard-normal shock `dw`.
    fn evolve_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        self.expectation_1d(t, x, dt) + self.std_deviation_1d(t, x, dt) * dw
    }
}
