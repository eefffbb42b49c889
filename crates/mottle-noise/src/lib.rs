//! Procedural 2D noise generators for grain and texture effects.
//!
//! Every generator implements the [`Noise2D`] sampling contract: given a
//! 2D coordinate, produce one scalar sample. Deterministic generators
//! ([`GradientNoise`], and [`LatticeNoise`] once constructed) return the
//! same value for the same coordinate on every call; stochastic
//! generators ([`GaussianNoise`], [`WhiteNoise`], [`ImpulseNoise`])
//! ignore the coordinate and advance an owned random source instead.
//!
//! The closed set of generator kinds is expressed by [`NoiseGenerator`],
//! and [`WeightedGenerator`] decorates any generator with a blend weight
//! in `[0, 1]`.
//!
//! # Example
//!
//! ```
//! use mottle_noise::{GradientNoise, Noise2D, NoiseGenerator, WeightedGenerator};
//!
//! let mut grain = WeightedGenerator::new(GradientNoise::new(1.0), 0.5);
//! let sample = grain.sample(12.4, 7.9);
//! assert!(sample.is_finite());
//! ```

mod gradient;
mod lattice;
mod random;

pub use gradient::GradientNoise;
pub use lattice::LatticeNoise;
pub use random::{GaussianNoise, ImpulseNoise, WhiteNoise, IMPULSE_VALUE};

use thiserror::Error;

/// A noise source that can be sampled at any 2D coordinate.
///
/// Takes `&mut self` because stochastic sources advance their internal
/// random state on every draw. Implementations are total: the result is
/// always finite for finite, well-formed parameters.
pub trait Noise2D {
    /// Samples the noise at the given coordinate.
    fn sample(&mut self, x: f32, y: f32) -> f32;
}

/// Errors from constructing or reconfiguring a noise generator.
#[derive(Debug, Clone, Error)]
pub enum NoiseError {
    /// The normal distribution parameters were rejected.
    #[error("invalid normal distribution: mu={mu}, sigma={sigma} (sigma must be finite and non-negative)")]
    InvalidNormal {
        /// Requested mean.
        mu: f32,
        /// Requested standard deviation.
        sigma: f32,
    },
}

/// A noise generator of one of the five supported kinds.
///
/// Dispatch over kinds is a closed sum type; each variant owns its own
/// parameters and, where stochastic, its own random source.
#[derive(Debug, Clone)]
pub enum NoiseGenerator {
    /// Spatially uncorrelated normal draws (grain).
    Gaussian(GaussianNoise),
    /// Deterministic Perlin-style gradient noise (texture).
    Gradient(GradientNoise),
    /// Value noise over a randomized integer lattice.
    Lattice(LatticeNoise),
    /// Uniform random draws per sample.
    White(WhiteNoise),
    /// Salt-and-pepper impulses.
    Impulse(ImpulseNoise),
}

impl Noise2D for NoiseGenerator {
    fn sample(&mut self, x: f32, y: f32) -> f32 {
        match self {
            NoiseGenerator::Gaussian(g) => g.sample(x, y),
            NoiseGenerator::Gradient(g) => g.sample(x, y),
            NoiseGenerator::Lattice(g) => g.sample(x, y),
            NoiseGenerator::White(g) => g.sample(x, y),
            NoiseGenerator::Impulse(g) => g.sample(x, y),
        }
    }
}

impl From<GaussianNoise> for NoiseGenerator {
    fn from(g: GaussianNoise) -> Self {
        NoiseGenerator::Gaussian(g)
    }
}

impl From<GradientNoise> for NoiseGenerator {
    fn from(g: GradientNoise) -> Self {
        NoiseGenerator::Gradient(g)
    }
}

impl From<LatticeNoise> for NoiseGenerator {
    fn from(g: LatticeNoise) -> Self {
        NoiseGenerator::Lattice(g)
    }
}

impl From<WhiteNoise> for NoiseGenerator {
    fn from(g: WhiteNoise) -> Self {
        NoiseGenerator::White(g)
    }
}

impl From<ImpulseNoise> for NoiseGenerator {
    fn from(g: ImpulseNoise) -> Self {
        NoiseGenerator::Impulse(g)
    }
}

/// A noise generator decorated with a blend weight in `[0, 1]`.
///
/// Sampling returns the wrapped generator's sample multiplied by the
/// current weight, so a weight of 0 silences the generator entirely and
/// a weight of 1 passes its output through unchanged. The weight is
/// mutable at any time; changes apply to all subsequent samples.
#[derive(Debug, Clone)]
pub struct WeightedGenerator {
    generator: NoiseGenerator,
    weight: f32,
}

impl WeightedGenerator {
    /// Wraps a generator with the given weight.
    ///
    /// The weight is clamped into `[0, 1]`.
    pub fn new(generator: impl Into<NoiseGenerator>, weight: f32) -> Self {
        Self {
            generator: generator.into(),
            weight: weight.clamp(0.0, 1.0),
        }
    }

    /// Returns the current weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the weight, clamped into `[0, 1]`.
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight.clamp(0.0, 1.0);
    }

    /// Returns the wrapped generator.
    pub fn generator(&self) -> &NoiseGenerator {
        &self.generator
    }

    /// Returns the wrapped generator for reconfiguration.
    pub fn generator_mut(&mut self) -> &mut NoiseGenerator {
        &mut self.generator
    }
}

impl Noise2D for WeightedGenerator {
    fn sample(&mut self, x: f32, y: f32) -> f32 {
        self.generator.sample(x, y) * self.weight
    }
}

/// Linear blend `b * t + a * (1 - t)`.
#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    b * t + a * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_zero_silences() {
        let mut gen = WeightedGenerator::new(GradientNoise::new(2.0), 0.0);
        for i in 0..50 {
            let v = gen.sample(i as f32 * 1.7, i as f32 * 0.3);
            assert_eq!(v, 0.0, "weight 0 must silence the generator");
        }
    }

    #[test]
    fn test_weight_one_is_identity() {
        let mut weighted = WeightedGenerator::new(GradientNoise::new(1.5), 1.0);
        let raw = GradientNoise::new(1.5);
        for i in 0..50 {
            let x = i as f32 * 0.37;
            let y = i as f32 * 1.13;
            assert_eq!(weighted.sample(x, y), raw.value(x, y));
        }
    }

    #[test]
    fn test_weight_is_clamped() {
        let mut gen = WeightedGenerator::new(WhiteNoise::with_seed(7), 3.0);
        assert_eq!(gen.weight(), 1.0);
        gen.set_weight(-0.5);
        assert_eq!(gen.weight(), 0.0);
    }

    #[test]
    fn test_weight_change_applies_immediately() {
        let mut gen = WeightedGenerator::new(GradientNoise::new(1.0), 1.0);
        let before = gen.sample(3.4, 5.6);
        gen.set_weight(0.0);
        assert_eq!(gen.sample(3.4, 5.6), 0.0);
        gen.set_weight(1.0);
        assert_eq!(gen.sample(3.4, 5.6), before);
    }

    #[test]
    fn test_enum_dispatch_matches_concrete() {
        let mut via_enum: NoiseGenerator = GradientNoise::new(1.0).into();
        let concrete = GradientNoise::new(1.0);
        assert_eq!(via_enum.sample(0.25, 0.75), concrete.value(0.25, 0.75));
    }

    #[test]
    fn test_all_kinds_finite() {
        let mut generators: Vec<NoiseGenerator> = vec![
            GaussianNoise::with_seed(0.0, 2.0, 1).unwrap().into(),
            GradientNoise::new(1.0).into(),
            LatticeNoise::with_seed(64, 64, 1.0, 2).into(),
            WhiteNoise::with_seed(3).into(),
            ImpulseNoise::with_seed(0.5, 4).into(),
        ];
        for gen in &mut generators {
            for i in 0..100 {
                let v = gen.sample(i as f32 * 0.9, i as f32 * 0.4);
                assert!(v.is_finite(), "sample must be finite, got {}", v);
            }
        }
    }
}
