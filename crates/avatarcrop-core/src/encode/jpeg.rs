//! JPEG encoding with configurable quality.
//!
//! JPEG has no alpha channel, so transparent regions (circle-clip corners,
//! out-of-bounds areas) are composited over black first; the same result a
//! browser canvas produces when serializing transparent content as JPEG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::EncodeError;
use crate::extract::RGBA_CHANNELS;

/// Encode RGBA pixel data to JPEG bytes.
///
/// `quality` is the configured 0.0-1.0 value, mapped onto the encoder's
/// 1-100 scale. The caller has already validated dimensions and buffer
/// length.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f64,
) -> Result<Vec<u8>, EncodeError> {
    let rgb = flatten_onto_black(pixels);
    let quality = quality_steps(quality);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Map the configured 0.0-1.0 quality onto the encoder's 1-100 scale.
fn quality_steps(quality: f64) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8
}

/// Composite RGBA over an opaque black background, dropping alpha.
fn flatten_onto_black(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / RGBA_CHANNELS * 3);
    for px in pixels.chunks_exact(RGBA_CHANNELS) {
        let alpha = px[3] as u32;
        rgb.push((px[0] as u32 * alpha / 255) as u8);
        rgb.push((px[1] as u32 * alpha / 255) as u8);
        rgb.push((px[2] as u32 * alpha / 255) as u8);
    }
    rgb
}
