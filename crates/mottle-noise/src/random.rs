//! Stochastic generators: spatially uncorrelated per-sample draws.
//!
//! All three generators here ignore the sample coordinate and return a
//! fresh draw from an owned random source on every call. Each offers a
//! `with_seed` constructor so tests can pin the stream.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{Noise2D, NoiseError};

/// The value an [`ImpulseNoise`] returns for a hot impulse.
///
/// Large enough that the downstream channel transform saturates an
/// affected pixel to full white.
pub const IMPULSE_VALUE: f32 = 25.0;

/// Normally distributed noise: visual grain rather than texture.
///
/// Every sample is an independent draw from `Normal(mu, sigma)`; the
/// coordinate is ignored. A `sigma` of 0 yields exactly `mu` on every
/// draw. Parameter changes apply to subsequent samples only.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    mu: f32,
    sigma: f32,
    normal: Normal<f32>,
    rng: SmallRng,
}

impl GaussianNoise {
    /// Creates a generator seeded from the operating system.
    ///
    /// Fails if `sigma` is negative or non-finite.
    pub fn new(mu: f32, sigma: f32) -> Result<Self, NoiseError> {
        Self::from_rng(mu, sigma, SmallRng::from_os_rng())
    }

    /// Creates a generator with an explicit seed, for reproducible
    /// streams.
    pub fn with_seed(mu: f32, sigma: f32, seed: u64) -> Result<Self, NoiseError> {
        Self::from_rng(mu, sigma, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(mu: f32, sigma: f32, rng: SmallRng) -> Result<Self, NoiseError> {
        let normal = Normal::new(mu, sigma).map_err(|_| NoiseError::InvalidNormal { mu, sigma })?;
        Ok(Self {
            mu,
            sigma,
            normal,
            rng,
        })
    }

    /// Returns the mean.
    pub fn mu(&self) -> f32 {
        self.mu
    }

    /// Returns the standard deviation.
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Sets the mean for subsequent samples.
    pub fn set_mu(&mut self, mu: f32) -> Result<(), NoiseError> {
        self.normal = Normal::new(mu, self.sigma).map_err(|_| NoiseError::InvalidNormal {
            mu,
            sigma: self.sigma,
        })?;
        self.mu = mu;
        Ok(())
    }

    /// Sets the standard deviation for subsequent samples.
    pub fn set_sigma(&mut self, sigma: f32) -> Result<(), NoiseError> {
        self.normal = Normal::new(self.mu, sigma).map_err(|_| NoiseError::InvalidNormal {
            mu: self.mu,
            sigma,
        })?;
        self.sigma = sigma;
        Ok(())
    }
}

impl Noise2D for GaussianNoise {
    fn sample(&mut self, _x: f32, _y: f32) -> f32 {
        self.normal.sample(&mut self.rng)
    }
}

/// Uniform white noise in `[0, 1)`, one independent draw per sample.
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    rng: SmallRng,
}

impl WhiteNoise {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Creates a generator with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl Noise2D for WhiteNoise {
    fn sample(&mut self, _x: f32, _y: f32) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Salt-and-pepper impulse noise.
///
/// With the configured probability a sample is the hot constant
/// [`IMPULSE_VALUE`]; otherwise it is 0. The probability is clamped
/// into `[0, 1]` and mutable at any time.
#[derive(Debug, Clone)]
pub struct ImpulseNoise {
    probability: f32,
    rng: SmallRng,
}

impl ImpulseNoise {
    /// Creates a generator seeded from the operating system.
    pub fn new(probability: f32) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Creates a generator with an explicit seed.
    pub fn with_seed(probability: f32, seed: u64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns the impulse probability.
    pub fn probability(&self) -> f32 {
        self.probability
    }

    /// Sets the impulse probability, clamped into `[0, 1]`.
    pub fn set_probability(&mut self, probability: f32) {
        self.probability = probability.clamp(0.0, 1.0);
    }
}

impl Noise2D for ImpulseNoise {
    fn sample(&mut self, _x: f32, _y: f32) -> f32 {
        if self.rng.random::<f32>() < self.probability {
            IMPULSE_VALUE
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_zero_sigma_returns_mu() {
        let mut noise = GaussianNoise::with_seed(4.5, 0.0, 1).unwrap();
        for _ in 0..100 {
            assert_eq!(noise.sample(0.0, 0.0), 4.5);
        }
    }

    #[test]
    fn test_gaussian_rejects_negative_sigma() {
        assert!(GaussianNoise::with_seed(0.0, -1.0, 1).is_err());
        let mut noise = GaussianNoise::with_seed(0.0, 1.0, 1).unwrap();
        assert!(noise.set_sigma(-0.5).is_err());
        // A failed setter leaves the previous parameters in place.
        assert_eq!(noise.sigma(), 1.0);
    }

    #[test]
    fn test_gaussian_ignores_coordinate() {
        let mut a = GaussianNoise::with_seed(0.0, 1.0, 42).unwrap();
        let mut b = GaussianNoise::with_seed(0.0, 1.0, 42).unwrap();
        for i in 0..50 {
            assert_eq!(a.sample(0.0, 0.0), b.sample(i as f32, -i as f32));
        }
    }

    #[test]
    fn test_gaussian_draws_are_independent() {
        let mut noise = GaussianNoise::with_seed(0.0, 1.0, 3).unwrap();
        let first = noise.sample(1.0, 1.0);
        let second = noise.sample(1.0, 1.0);
        assert_ne!(first, second, "successive draws should differ");
    }

    #[test]
    fn test_gaussian_finite() {
        let mut noise = GaussianNoise::with_seed(2.0, 5.0, 9).unwrap();
        for _ in 0..1000 {
            assert!(noise.sample(0.0, 0.0).is_finite());
        }
    }

    #[test]
    fn test_white_in_unit_range() {
        let mut noise = WhiteNoise::with_seed(8);
        for _ in 0..1000 {
            let v = noise.sample(0.0, 0.0);
            assert!((0.0..1.0).contains(&v), "white sample {} out of [0, 1)", v);
        }
    }

    #[test]
    fn test_impulse_extremes_only() {
        let mut noise = ImpulseNoise::with_seed(0.3, 21);
        let mut hot = 0u32;
        for _ in 0..1000 {
            let v = noise.sample(0.0, 0.0);
            assert!(v == 0.0 || v == IMPULSE_VALUE);
            if v == IMPULSE_VALUE {
                hot += 1;
            }
        }
        // ~300 expected; allow a generous band.
        assert!((150..450).contains(&hot), "hot count {} implausible", hot);
    }

    #[test]
    fn test_impulse_probability_bounds() {
        let mut never = ImpulseNoise::with_seed(0.0, 5);
        let mut always = ImpulseNoise::with_seed(1.0, 5);
        for _ in 0..200 {
            assert_eq!(never.sample(0.0, 0.0), 0.0);
            assert_eq!(always.sample(0.0, 0.0), IMPULSE_VALUE);
        }
    }

    #[test]
    fn test_impulse_probability_clamped() {
        let noise = ImpulseNoise::with_seed(7.0, 1);
        assert_eq!(noise.probability(), 1.0);
        let noise = ImpulseNoise::with_seed(-0.2, 1);
        assert_eq!(noise.probability(), 0.0);
    }
}
