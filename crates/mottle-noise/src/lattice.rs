//! Value noise over a randomized integer lattice.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{lerp, Noise2D};

/// Cubic ease curve `t^2 (3 - 2t)`.
#[inline]
fn ease(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Value noise: random integers stored at lattice corners, interpolated
/// with a cubic ease and clamped to `[-2, 2]`.
///
/// The lattice dimension is `max(width, height)` and corner indices are
/// wrapped by masking with `dimension - 1`, so the dimension must be a
/// power of two; other dimensions produce incorrect wrap-around
/// indexing. Construction randomizes the lattice, so two instances
/// built without an explicit seed sample differently; sampling itself
/// is deterministic for a given instance.
///
/// # Example
///
/// ```
/// use mottle_noise::LatticeNoise;
///
/// let noise = LatticeNoise::with_seed(256, 256, 1.0, 42);
/// let v = noise.value(10.5, 3.25);
/// assert_eq!(v, noise.value(10.5, 3.25));
/// assert!((-2.0..=2.0).contains(&v));
/// ```
#[derive(Debug, Clone)]
pub struct LatticeNoise {
    grid: Vec<i32>,
    permutation: Vec<i32>,
    mask: i32,
    scale: f32,
}

impl LatticeNoise {
    /// Creates a lattice sized to the given image dimensions, seeded
    /// from the operating system.
    ///
    /// `max(width, height)` must be a non-zero power of two.
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self::from_rng(width, height, scale, SmallRng::from_os_rng())
    }

    /// Creates a lattice with an explicit seed, for reproducible
    /// construction.
    pub fn with_seed(width: u32, height: u32, scale: f32, seed: u64) -> Self {
        Self::from_rng(width, height, scale, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(width: u32, height: u32, scale: f32, mut rng: SmallRng) -> Self {
        let dimension = width.max(height) as usize;
        let mask = dimension as i32 - 1;

        let mut grid = Vec::with_capacity(dimension);
        let mut permutation = vec![0i32; dimension * 2];
        for i in 0..dimension {
            grid.push(rng.random::<i32>());
            permutation[i] = i as i32;
        }

        // Shuffle the lower half; only the swapped-to index is mirrored
        // into the upper half, so upper entries never chosen as a swap
        // target keep their zero initialization.
        for i in 0..dimension {
            let k = (rng.random_range(0..i32::MAX) & mask) as usize;
            permutation.swap(i, k);
            permutation[k + dimension] = permutation[k];
        }

        Self {
            grid,
            permutation,
            mask,
            scale,
        }
    }

    /// Returns the output scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the output scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Samples the noise at the given coordinate.
    ///
    /// Deterministic for a constructed instance, so it is available on
    /// `&self`; the [`Noise2D`] impl delegates here.
    pub fn value(&self, x: f32, y: f32) -> f32 {
        let xi = x.floor() as i32;
        let yi = y.floor() as i32;

        let dx = x - xi as f32;
        let dy = y - yi as f32;

        let x0 = xi & self.mask;
        let x1 = (x0 + 1) & self.mask;
        let y0 = yi & self.mask;
        let y1 = (y0 + 1) & self.mask;

        let c1 = self.corner(x0, y0);
        let c2 = self.corner(x1, y0);
        let c3 = self.corner(x0, y1);
        let c4 = self.corner(x1, y1);

        let sx = ease(dx);
        let sy = ease(dy);

        // The second row and the vertical blend both use sy.
        let ix0 = lerp(c1, c2, sx);
        let iy0 = lerp(c3, c4, sy);

        lerp(ix0, iy0, sy).clamp(-2.0, 2.0)
    }

    /// Double-hashes a corner through the permutation table into the
    /// value grid.
    fn corner(&self, cx: i32, cy: i32) -> f32 {
        let h = self.permutation[(self.permutation[cx as usize] + cy) as usize] & self.mask;
        self.grid[h as usize] as f32
    }
}

impl Noise2D for LatticeNoise {
    fn sample(&mut self, x: f32, y: f32) -> f32 {
        self.value(x, y)
    }
}
