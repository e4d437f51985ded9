//! PNG encoding - the default output format.
//!
//! PNG is the only format of the set that both keeps the alpha channel and
//! is universally safe as a profile-picture upload target, which is why it
//! is the default. Quality does not apply; PNG is lossless.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::EncodeError;

/// Encode RGBA pixel data to PNG bytes, alpha preserved.
///
/// The caller (the [`encode`](super::encode) dispatcher) has already
/// validated dimensions and buffer length.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();

    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 20 * 20 * 4];
        let png = encode_png(&pixels, 20, 20).unwrap();

        // PNG signature
        assert_eq!(&png[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_png_round_trips_alpha() {
        // Half transparent, half opaque
        let mut pixels = vec![0u8; 4 * 2 * 4];
        for px in pixels.chunks_exact_mut(4).skip(4) {
            px.copy_from_slice(&[200, 100, 50, 255]);
        }

        let png = encode_png(&pixels, 4, 2).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();

        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(0, 1).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_encode_png_single_pixel() {
        let pixels = vec![255, 0, 0, 255];
        let png = encode_png(&pixels, 1, 1).unwrap();
        assert!(!png.is_empty());
    }
}
