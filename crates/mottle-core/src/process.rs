//! The compositing processor: accumulate noise, transform channels.

use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use mottle_image::{CodecError, PixelBuffer};
use mottle_noise::WeightedGenerator;

use crate::field::NoiseField;

/// Errors from a file-to-file processing run.
///
/// The failure kind tells the caller which phase aborted the run; the
/// wrapped [`CodecError`] carries the originating cause.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Reading or decoding the source image failed.
    #[error("failed to read source image: {0}")]
    Load(#[source] CodecError),

    /// Encoding or writing the output image failed.
    #[error("failed to write output image: {0}")]
    Save(#[source] CodecError),
}

/// Composites the weighted generators onto the source image.
///
/// Allocates a [`NoiseField`] matching the image, accumulates every
/// generator in list order, then walks every pixel once more and
/// transforms the color channels. The source buffer is never mutated; a
/// new output buffer is returned.
///
/// For each pixel with accumulated scalar `n`: `mul = 1 + 0.10 * n`,
/// `add = 20 * n`, and each of red, green, and blue independently
/// becomes `clamp(round(old * mul + add), 0, 255)`. Alpha passes
/// through unchanged.
pub fn composite(image: &PixelBuffer, generators: &mut [WeightedGenerator]) -> PixelBuffer {
    let (width, height) = image.dimensions();

    let mut field = NoiseField::new(width as usize, height as usize);
    for generator in generators.iter_mut() {
        field.accumulate(generator);
    }

    let mut output = PixelBuffer::filled(width, height, [0, 0, 0, 0]);
    for y in 0..height {
        for x in 0..width {
            let n = field.get(x as usize, y as usize);
            output.set_pixel(x, y, apply_noise(n, image.pixel(x, y)));
        }
    }
    output
}

/// Applies the channel transform for one pixel.
fn apply_noise(noise: f32, rgba: [u8; 4]) -> [u8; 4] {
    let mul = 1.0 + noise * 0.10;
    let add = noise * 20.0;

    let transform = |channel: u8| (channel as f32 * mul + add).round().clamp(0.0, 255.0) as u8;

    [
        transform(rgba[0]),
        transform(rgba[1]),
        transform(rgba[2]),
        rgba[3],
    ]
}

/// Runs the full pipeline: load `input`, composite, save PNG to
/// `output`.
///
/// The three phases are strictly sequential and the run aborts on the
/// first failure; the error distinguishes the load phase from the save
/// phase.
pub fn process_file(
    input: &Path,
    output: &Path,
    generators: &mut [WeightedGenerator],
) -> Result<(), ProcessError> {
    info!("loading {}", input.display());
    let image = mottle_image::load(input).map_err(ProcessError::Load)?;

    let (width, height) = image.dimensions();
    debug!(
        "compositing {} generator(s) over {}x{} pixels",
        generators.len(),
        width,
        height
    );
    let result = composite(&image, generators);

    mottle_image::save_png(&result, output).map_err(ProcessError::Save)?;
    info!("wrote {}", output.display());
    Ok(())
}
