//! Core types for upload decoding.

use thiserror::Error;

/// Error types for decoding an uploaded file.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not in a recognized or supported image format.
    #[error("Unrecognized or unsupported image format")]
    UnknownFormat,

    /// The file looks like an image but could not be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    Corrupted(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded upload with RGBA pixel data.
///
/// Immutable once loaded: a new upload replaces the whole value, never
/// mutates it in place. The alpha channel is carried so extraction can leave
/// uncovered output regions transparent.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl SourceImage {
    /// Create a new SourceImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height * 4) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a SourceImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(8), Orientation::Rotate270CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_source_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 4];
        let img = SourceImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixels.len(), 20000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_source_image_empty() {
        let img = SourceImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_rgba_image_round_trip() {
        let mut rgba = image::RgbaImage::new(3, 2);
        rgba.put_pixel(1, 1, image::Rgba([10, 20, 30, 255]));

        let img = SourceImage::from_rgba_image(rgba);
        assert_eq!(img.width, 3);
        assert_eq!(img.height, 2);

        let back = img.to_rgba_image().unwrap();
        assert_eq!(back.get_pixel(1, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::Corrupted("truncated scanline".to_string());
        assert_eq!(
            err.to_string(),
            "Corrupted or incomplete image file: truncated scanline"
        );

        let err = DecodeError::UnknownFormat;
        assert_eq!(err.to_string(), "Unrecognized or unsupported image format");
    }
}
