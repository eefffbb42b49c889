//! Noise accumulation and grain compositing.
//!
//! The pipeline has three strictly sequential phases: decode the source
//! image, accumulate every weighted generator into a [`NoiseField`]
//! sized to the image, then transform each pixel's color channels as a
//! function of the accumulated scalar and write the result out.
//!
//! # Example
//!
//! ```
//! use mottle_core::composite;
//! use mottle_image::PixelBuffer;
//! use mottle_noise::{GaussianNoise, WeightedGenerator};
//!
//! let source = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
//! let mut generators = vec![WeightedGenerator::new(
//!     GaussianNoise::with_seed(0.0, 0.0, 1).unwrap(),
//!     1.0,
//! )];
//!
//! let output = composite(&source, &mut generators);
//! // Baseline noise of 1.0 brightens black to (20, 20, 20).
//! assert_eq!(output.pixel(0, 0), [20, 20, 20, 255]);
//! ```

mod field;
mod process;

pub use field::{NoiseField, BASELINE};
pub use process::{composite, process_file, ProcessError};
