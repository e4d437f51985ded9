//! Payload encoding for the save/export path.
//!
//! The extracted RGBA raster is encoded to the configured output format.
//! Format and quality are configuration, validated at construction time; by
//! the time bytes reach this module the format is one of the closed
//! [`OutputFormat`](crate::OutputFormat) set.

mod jpeg;
mod png;
mod webp;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use webp::encode_webp;

use thiserror::Error;

use crate::extract::RGBA_CHANNELS;
use crate::OutputFormat;

/// Errors that can occur while encoding the output raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// An encoded output image ready to hand to the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPayload {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl EncodedPayload {
    /// MIME type matching the payload bytes.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Encode an RGBA raster in the requested output format.
///
/// `quality` is the configured 0.0-1.0 value. Only JPEG consumes it; PNG is
/// lossless by nature and the WebP encoder used here is lossless-only.
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: f64,
) -> Result<Vec<u8>, EncodeError> {
    validate_raster(pixels, width, height)?;

    match format {
        OutputFormat::Png => png::encode_png(pixels, width, height),
        OutputFormat::Jpeg => jpeg::encode_jpeg(pixels, width, height, quality),
        OutputFormat::Webp => webp::encode_webp(pixels, width, height),
    }
}

/// Shared dimension and buffer-length validation for all encoders.
fn validate_raster(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * RGBA_CHANNELS;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}
