//! Decoding uploaded bytes with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, Orientation, SourceImage};

/// Decode an uploaded file's bytes into a [`SourceImage`].
///
/// The container format is guessed from the bytes (JPEG, PNG, GIF, and WebP
/// are enabled), EXIF orientation is applied when present (phone cameras
/// routinely store sideways rasters plus a rotation tag), and the result is
/// converted to RGBA.
///
/// # Errors
///
/// Returns `DecodeError::UnknownFormat` if the bytes are not in a supported
/// image format, and `DecodeError::Corrupted` if they are but decoding fails.
pub fn decode_upload(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    // Extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnknownFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        image::ImageError::Unsupported(_) => DecodeError::UnknownFormat,
        other => DecodeError::Corrupted(other.to_string()),
    })?;

    let oriented = apply_orientation(img, orientation);
    Ok(SourceImage::from_rgba_image(oriented.into_rgba8()))
}

/// Extract EXIF orientation from uploaded bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

/// Extract EXIF orientation from the container, if any.
///
/// Returns `Orientation::Normal` when there is no EXIF data or the tag
/// cannot be read; formats without EXIF simply fall through here.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

    /// Encode a small RGBA test pattern as PNG bytes.
    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let mut img = RgbaImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 40) as u8, (y * 40) as u8, 128, 255]);
        }
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_valid_png() {
        let bytes = png_fixture(5, 3);
        let result = decode_upload(&bytes);
        assert!(result.is_ok(), "Failed to decode PNG: {:?}", result.err());

        let img = result.unwrap();
        assert_eq!(img.width, 5);
        assert_eq!(img.height, 3);
        assert_eq!(img.pixels.len(), 5 * 3 * 4);
    }

    #[test]
    fn test_decode_preserves_pixel_values() {
        let bytes = png_fixture(4, 4);
        let img = decode_upload(&bytes).unwrap();

        // Pixel (2, 1) of the fixture pattern
        let idx = ((4 + 2) * 4) as usize;
        assert_eq!(&img.pixels[idx..idx + 4], &[80, 40, 128, 255]);
    }

    #[test]
    fn test_decode_garbage_bytes() {
        let result = decode_upload(&[0x00, 0x01, 0x02, 0x03, 0x04]);
        assert!(matches!(result, Err(DecodeError::UnknownFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        let result = decode_upload(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_fixture(8, 8);
        // Keep the signature so the format is recognized, then truncate
        let result = decode_upload(&bytes[0..24]);
        assert!(matches!(result, Err(DecodeError::Corrupted(_))));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        // PNG fixtures carry no EXIF data
        let bytes = png_fixture(2, 2);
        assert_eq!(get_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_normal() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        let result = apply_orientation(DynamicImage::ImageRgba8(img), Orientation::Normal);
        let rgba = result.into_rgba8();
        assert_eq!(rgba.dimensions(), (2, 2));
        assert_eq!(rgba.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        // A 2x1 strip rotated 90 CW becomes a 1x2 column
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));

        let result = apply_orientation(DynamicImage::ImageRgba8(img), Orientation::Rotate90CW);
        let rgba = result.into_rgba8();
        assert_eq!(rgba.dimensions(), (1, 2));
        // Left pixel of the strip ends up at the top
        assert_eq!(rgba.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));

        let result =
            apply_orientation(DynamicImage::ImageRgba8(img), Orientation::FlipHorizontal);
        let rgba = result.into_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(rgba.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));

        let result = apply_orientation(DynamicImage::ImageRgba8(img), Orientation::Rotate180);
        let rgba = result.into_rgba8();
        assert_eq!(rgba.dimensions(), (2, 1));
        assert_eq!(rgba.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(rgba.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }
}
