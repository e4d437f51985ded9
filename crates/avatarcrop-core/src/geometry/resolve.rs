//! Crop resolution: mapping the crop window back to source-image pixels.

use serde::{Deserialize, Serialize};

use super::{CropWindow, Vec2};

/// The region of the original (unscaled) image that maps onto the crop
/// window under the current transform, in source pixel coordinates.
///
/// Deliberately unclamped: when the user pans or zooms the image past the
/// window edges, the rectangle extends outside
/// `[0, natural_width] x [0, natural_height]`, and extraction leaves the
/// uncovered destination area unpainted instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Map the crop window back to source pixels.
///
/// Inverts the on-screen placement: a container point `p` shows source pixel
/// `(p - offset) / effective_scale`, so the window's origin and extent divide
/// through by the effective scale.
pub fn resolve_source_rect(offset: Vec2, effective_scale: f64, crop: &CropWindow) -> SourceRect {
    SourceRect {
        x: (crop.x - offset.x) / effective_scale,
        y: (crop.y - offset.y) / effective_scale,
        width: crop.width / effective_scale,
        height: crop.height / effective_scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;

    #[test]
    fn test_resolve_fit_centered() {
        // The end-to-end reference scenario: 800x600 image in a 250x350
        // container at fit scale 0.3125, crop window centered at (0, 50).
        let mut crop = CropWindow::sized(250.0, None);
        crop.center_in(Viewport::new(250.0, 350.0));

        let rect = resolve_source_rect(Vec2::new(0.0, 81.25), 0.3125, &crop);

        assert!((rect.x - 0.0).abs() < 1e-9);
        assert!((rect.y - -100.0).abs() < 1e-9);
        assert!((rect.width - 800.0).abs() < 1e-9);
        assert!((rect.height - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_does_not_clamp() {
        let crop = CropWindow {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        };
        // Image dragged far right and down: the window looks at space left
        // of and above the image origin.
        let rect = resolve_source_rect(Vec2::new(500.0, 300.0), 1.0, &crop);
        assert_eq!(rect.x, -500.0);
        assert_eq!(rect.y, -300.0);
    }

    #[test]
    fn test_resolve_round_trip() {
        let crop = CropWindow {
            x: 40.0,
            y: 55.0,
            width: 200.0,
            height: 120.0,
        };
        let offset = Vec2::new(-12.5, 7.0);
        let scale = 0.65;

        let rect = resolve_source_rect(offset, scale, &crop);

        assert!((rect.x * scale + offset.x - crop.x).abs() < 1e-9);
        assert!((rect.y * scale + offset.y - crop.y).abs() < 1e-9);
        assert!((rect.width * scale - crop.width).abs() < 1e-9);
        assert!((rect.height * scale - crop.height).abs() < 1e-9);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
