//! WebP encoding.
//!
//! The `image` crate's WebP encoder is lossless-only, so the configured
//! quality is not consumed here; alpha survives like it does for PNG.

use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;

use super::EncodeError;

/// Encode RGBA pixel data to lossless WebP bytes.
///
/// The caller has already validated dimensions and buffer length.
pub fn encode_webp(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();

    let encoder = WebPEncoder::new_lossless(&mut buffer);
    encoder
        .encode(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "WebP",
            message: e.to_string(),
        })?;

    Ok(buffer)
}
