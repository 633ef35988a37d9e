//! Monte Carlo path simulation.
//!
//! # Overview
//!
//! * [`Path`]: a single realisation of the process (times + values)
//! * [`PathMatrix`]: many realisations on a common grid, one row per path,
//!   one column per time step, column 0 = initial price
//! * [`PathGenerator`]: simulates paths of a [`StochasticProcess1D`] on a
//!   uniform grid

use lsmc_core::{ensure, errors::Result, Real, Size, Time};
use lsmc_math::random_numbers::InverseCumulativeNormalRng;
use lsmc_math::Matrix;
use lsmc_processes::StochasticProcess1D;
use tracing::debug;

// ─── Path ─────────────────────────────────────────────────────────────────────

/// A single sample path: a sequence of time-value pairs.
///
/// Paths produced by [`PathGenerator`] always contain the initial point.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Time points (including t=0).
    pub times: Vec<Time>,
    /// Process values at each time point.
    pub values: Vec<Real>,
}

impl Path {
    /// Number of time steps (= len − 1).
    pub fn steps(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// The initial value, `None` for an empty path.
    pub fn front(&self) -> Option<Real> {
        self.values.first().copied()
    }

    /// The final value, `None` for an empty path.
    pub fn back(&self) -> Option<Real> {
        self.values.last().copied()
    }

    /// Number of points including the initial one.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the path has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ─── PathMatrix ───────────────────────────────────────────────────────────────

/// Simulated prices, `paths × (steps + 1)`.
///
/// Invariants, checked on construction: at least one path, at least one time
/// point, every price finite and non-negative. A common starting price in
/// column 0 is conventional but not required.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix(Matrix);

impl PathMatrix {
    /// Validate and wrap a matrix of prices.
    pub fn new(prices: Matrix) -> Result<Self> {
        ensure!(prices.rows() > 0, "path matrix must contain at least one path");
        ensure!(prices.cols() > 0, "paths must contain at least one price");
        for (p, path) in prices.row_iter().enumerate() {
            for (t, &s) in path.iter().enumerate() {
                ensure!(
                    s.is_finite() && s >= 0.0,
                    "price at path {p}, step {t} must be finite and non-negative, got {s}"
                );
            }
        }
        Ok(Self(prices))
    }

    /// Build from one row of prices per path.
    pub fn from_rows<R: AsRef<[Real]>>(rows: &[R]) -> Result<Self> {
        Self::new(Matrix::from_rows(rows)?)
    }

    /// Number of simulated paths.
    pub fn num_paths(&self) -> Size {
        self.0.rows()
    }

    /// Number of time points per path (steps + 1).
    pub fn num_points(&self) -> Size {
        self.0.cols()
    }

    /// Number of time steps per path.
    pub fn steps(&self) -> Size {
        self.0.cols() - 1
    }

    /// Prices of every path at time index `t`.
    pub fn prices_at(&self, t: usize) -> Result<&[Real]> {
        self.0.column(t)
    }

    /// Prices of every path at the last time point.
    pub fn terminal_prices(&self) -> &[Real] {
        let n = self.0.rows();
        &self.0.inner().as_slice()[self.steps() * n..]
    }

    /// Copy of path `p`.
    pub fn path(&self, p: usize) -> Result<Vec<Real>> {
        self.0.row(p)
    }

    /// Price on path `p` at time index `t`.
    pub fn price(&self, p: usize, t: usize) -> Result<Real> {
        self.0.get(p, t)
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.0
    }

    /// Consume and return the underlying matrix.
    pub fn into_inner(self) -> Matrix {
        self.0
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Generates sample paths of a 1-D stochastic process on a uniform grid.
///
/// Each step calls the process's `evolve_1d` with one standard-normal draw
/// from an MT19937-64 stream, so a given seed reproduces the same paths.
pub struct PathGenerator<'a> {
    process: &'a dyn StochasticProcess1D,
    dt: Time,
    steps: usize,
    rng: InverseCumulativeNormalRng,
}

impl<'a> PathGenerator<'a> {
    /// Create a new path generator.
    ///
    /// # Arguments
    /// * `process`: the stochastic process to simulate
    /// * `maturity`: total time horizon, must be positive
    /// * `steps`: number of time steps, at least one
    /// * `seed`: RNG seed
    pub fn new(
        process: &'a dyn StochasticProcess1D,
        maturity: Time,
        steps: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(process, maturity, steps, InverseCumulativeNormalRng::new(seed))
    }

    /// Create a generator seeded from OS entropy (non-reproducible).
    pub fn from_entropy(
        process: &'a dyn StochasticProcess1D,
        maturity: Time,
        steps: usize,
    ) -> Result<Self> {
        Self::with_rng(process, maturity, steps, InverseCumulativeNormalRng::from_entropy())
    }

    fn with_rng(
        process: &'a dyn StochasticProcess1D,
        maturity: Time,
        steps: usize,
        rng: InverseCumulativeNormalRng,
    ) -> Result<Self> {
        ensure!(
            maturity.is_finite() && maturity > 0.0,
            "maturity must be positive, got {maturity}"
        );
        ensure!(steps > 0, "at least one time step is required");
        Ok(Self {
            process,
            dt: maturity / steps as Real,
            steps,
            rng,
        })
    }

    /// Length of one time step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Number of time steps per path.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Generate one sample path.
    pub fn next_path(&mut self) -> Path {
        let mut times = Vec::with_capacity(self.steps + 1);
        let mut values = Vec::with_capacity(self.steps + 1);

        let mut x = self.process.x0();
        times.push(0.0);
        values.push(x);

        for i in 0..self.steps {
            let t = i as Real * self.dt;
            let dw = self.rng.next_real();
            x = self.process.evolve_1d(t, x, self.dt, dw);
            times.push(t + self.dt);
            values.push(x);
        }

        Path { times, values }
    }

    /// Simulate `n_paths` paths into a [`PathMatrix`].
    pub fn generate(&mut self, n_paths: usize) -> Result<PathMatrix> {
        ensure!(n_paths > 0, "at least one path is required");
        let mut prices = Matrix::zeros(n_paths, self.steps + 1);
        for p in 0..n_paths {
            let path = self.next_path();
            for (t, &v) in path.values.iter().enumerate() {
                prices[(p, t)] = v;
            }
        }
        debug!(
            paths = n_paths,
            steps = self.steps,
            dt = self.dt,
            "simulated path matrix"
        );
        PathMatrix::new(prices)
    }
}
