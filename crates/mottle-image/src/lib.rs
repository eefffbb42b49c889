//! Pixel buffers and a thin codec wrapper over the `image` crate.
//!
//! The rest of the workspace works on [`PixelBuffer`]: row-major,
//! RGBA-interleaved, four bytes per pixel. Decoding accepts any format
//! the `image` crate recognizes; encoding always produces PNG.
//!
//! # Example
//!
//! ```
//! use mottle_image::PixelBuffer;
//!
//! let buffer = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
//! let png = mottle_image::encode_png(buffer.data(), 2, 2).unwrap();
//! let decoded = mottle_image::decode(&png).unwrap();
//! assert_eq!(decoded.dimensions(), (2, 2));
//! assert_eq!(decoded.pixel(0, 0), [0, 0, 0, 255]);
//! ```

use std::io::Cursor;
use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

/// Errors from decoding or encoding image data.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input bytes are not a supported image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(#[source] image::ImageError),

    /// An encode was handed a buffer whose length does not match the
    /// stated dimensions.
    #[error("buffer size mismatch: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Stated width.
        width: u32,
        /// Stated height.
        height: u32,
        /// `width * height * 4`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// Encoding failed inside the image library.
    #[error("failed to encode image: {0}")]
    EncodeFailed(#[source] image::ImageError),

    /// Reading or writing the file failed.
    #[error("image I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A decoded raster image: row-major, RGBA interleaved, 8 bits per
/// channel.
///
/// Invariant: `data.len() == width * height * 4`, enforced by every
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
    has_alpha: bool,
}

impl PixelBuffer {
    /// Creates a buffer from raw RGBA bytes.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height * 4`.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 4,
            "data length must match width * height * 4"
        );
        Self {
            width,
            height,
            data,
            has_alpha: true,
        }
    }

    /// Creates a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
            has_alpha: true,
        }
    }

    /// Returns `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the source image carried an alpha channel.
    ///
    /// The pixel data is always stored as RGBA; sources without alpha
    /// decode as fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Returns the raw interleaved RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reads the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Writes the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

/// Decodes image bytes into a [`PixelBuffer`].
///
/// Any format the `image` crate recognizes is accepted; the pixels are
/// converted to RGBA8. Fails with [`CodecError::UnsupportedFormat`] if
/// the bytes are not a decodable image.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let img = image::load_from_memory(bytes).map_err(CodecError::UnsupportedFormat)?;
    let has_alpha = img.color().has_alpha();
    let width = img.width();
    let height = img.height();
    let data = img.into_rgba8().into_raw();
    Ok(PixelBuffer {
        width,
        height,
        data,
        has_alpha,
    })
}

/// Reads and decodes an image file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, CodecError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Encodes raw RGBA bytes as PNG.
///
/// Rejects the input with [`CodecError::BufferSizeMismatch`] before any
/// encoding work if `data.len() != width * height * 4`; a wrong-size
/// buffer is never truncated or padded.
pub fn encode_png(data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, CodecError> {
    let expected = (width as usize) * (height as usize) * 4;
    if data.len() != expected {
        return Err(CodecError::BufferSizeMismatch {
            width,
            height,
            expected,
            actual: data.len(),
        });
    }

    // Length was checked above, so construction cannot fail.
    let img = RgbaImage::from_raw(width, height, data.to_vec()).ok_or(
        CodecError::BufferSizeMismatch {
            width,
            height,
            expected,
            actual: data.len(),
        },
    )?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(CodecError::EncodeFailed)?;
    Ok(bytes)
}

/// Encodes a buffer as PNG and writes it to `path`, creating parent
/// directories as needed.
pub fn save_png<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<(), CodecError> {
    let path = path.as_ref();
    let bytes = encode_png(buffer.data(), buffer.width, buffer.height)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_roundtrip() {
        let mut buffer = PixelBuffer::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(buffer.pixel(2, 1), [1, 2, 3, 4]);
        buffer.set_pixel(0, 1, [9, 8, 7, 6]);
        assert_eq!(buffer.pixel(0, 1), [9, 8, 7, 6]);
        assert_eq!(buffer.pixel(0, 0), [1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "data length must match")]
    fn test_from_raw_rejects_wrong_length() {
        PixelBuffer::from_raw(vec![0u8; 10], 2, 2);
    }

    #[test]
    fn test_encode_rejects_wrong_size() {
        let err = encode_png(&[0u8; 15], 2, 2).unwrap_err();
        match err {
            CodecError::BufferSizeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("expected BufferSizeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(&[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_png_roundtrip() {
        let mut buffer = PixelBuffer::filled(4, 3, [10, 20, 30, 255]);
        buffer.set_pixel(1, 2, [200, 100, 50, 255]);

        let png = encode_png(buffer.data(), 4, 3).unwrap();
        let decoded = decode(&png).unwrap();

        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.pixel(1, 2), [200, 100, 50, 255]);
        assert_eq!(decoded.pixel(0, 0), [10, 20, 30, 255]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("mottle-image-test");
        let path = dir.join("out.png");
        let buffer = PixelBuffer::filled(2, 2, [5, 6, 7, 255]);

        save_png(&buffer, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.pixel(1, 1), [5, 6, 7, 255]);

        let _ = std::fs::remove_dir_all(dir);
    }
}
