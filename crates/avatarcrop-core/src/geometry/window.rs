//! The crop window: the fixed-size rectangle the output region is selected
//! through.

use serde::{Deserialize, Serialize};

use super::{Vec2, Viewport};

/// A rectangle in container coordinates framing the output region.
///
/// Its size is fixed for the session once the side length and aspect ratio
/// are chosen; only the position changes, and only during initialization
/// (recentering), never during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropWindow {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropWindow {
    /// Window sized from the configured side length and optional
    /// width/height ratio, positioned at the origin until initialization
    /// centers it.
    pub fn sized(size: f64, aspect_ratio: Option<f64>) -> Self {
        let height = match aspect_ratio {
            Some(ratio) => size / ratio,
            None => size,
        };
        Self {
            x: 0.0,
            y: 0.0,
            width: size,
            height,
        }
    }

    /// Recenter within the viewport. Size is untouched.
    pub fn center_in(&mut self, viewport: Viewport) {
        self.x = (viewport.width - self.width) / 2.0;
        self.y = (viewport.height - self.height) / 2.0;
    }

    /// Center point of the window, in container coordinates.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
