//! Dense per-pixel scalar accumulator.

use mottle_noise::Noise2D;

/// The value every cell starts at.
///
/// With zero generators the channel transform therefore still applies a
/// fixed 1.10x multiplicative and 20-unit additive nudge; downstream
/// output depends on this exact baseline.
pub const BASELINE: f32 = 1.0;

/// A dense 2D scalar field, one cell per image pixel.
///
/// Cells are stored row-major (`y * width + x`) and initialized to
/// [`BASELINE`]. The field is mutated only by summation and is meant to
/// live for a single compositing run.
#[derive(Debug, Clone)]
pub struct NoiseField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl NoiseField {
    /// Creates a field of `width * height` cells, all at [`BASELINE`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![BASELINE; width * height],
        }
    }

    /// Returns `(width, height)` in cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Reads the accumulated scalar at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Adds one generator's contribution to every cell.
    ///
    /// Pixels are visited in row-major order (y outer, x inner) and the
    /// sample for `(x as f32, y as f32)` is added to the cell. Summation
    /// order is fixed for reproducibility with stochastic sources;
    /// per-cell sums are independent of the order generators are
    /// accumulated in.
    pub fn accumulate<S: Noise2D + ?Sized>(&mut self, source: &mut S) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.data[y * self.width + x] += source.sample(x as f32, y as f32);
            }
        }
    }

    /// Returns the raw cells, row-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
