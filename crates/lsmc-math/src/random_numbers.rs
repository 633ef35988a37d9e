//! Random number generators for path simulation.
//!
//! A 64-bit Mersenne Twister (`rand_mt`) provides uniforms; normals are
//! obtained by inversion so that a given seed always yields the same paths.

use crate::distributions::inverse_normal_cdf;
use lsmc_core::Real;
use rand_mt::Mt19937GenRand64;

/// A uniform pseudo-random number generator based on MT19937-64.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Create a generator seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // top 53 bits → exactly representable doubles
        (self.rng.next_u64() >> 11) as Real / (1u64 << 53) as Real
    }
}

/// Standard-normal deviates by inverse-CDF transform of MT19937-64 uniforms.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }

    /// Create a generator seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self {
            inner: MersenneTwisterUniformRng::from_entropy(),
        }
    }

    /// Generate the next standard-normal deviate.
    pub fn next_real(&mut self) -> Real {
        // Exact 0 would map to -∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        inverse_normal_cdf(u)
    }
}
