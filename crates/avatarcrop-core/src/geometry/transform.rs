//! Image placement state: offset, zoom, and initial-fit computation.

use serde::{Deserialize, Serialize};

/// A point or displacement in container coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Measured size of the cropping container.
///
/// A container that has not been laid out yet reports zero dimensions; all
/// geometry defers until `is_measured` returns true, so the fit computation
/// never divides by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the container has a real layout size.
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Zoom state of the placed image.
///
/// `Fit` stands for "the computed initial-fit scale" until the user moves
/// the slider. It replaces a zero-valued scale sentinel so geometry code can
/// never confuse "not chosen yet" with a literal zero factor; only the
/// resolved effective scale is ever used in math.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Zoom {
    /// Use the cached initial-fit scale.
    #[default]
    Fit,
    /// An explicit slider value.
    Level(f64),
}

impl Zoom {
    /// Interpret a slider value. The slider minimum (0.0) means "initial
    /// fit"; everything else is an explicit level.
    pub fn from_slider(value: f64) -> Self {
        if value == 0.0 {
            Zoom::Fit
        } else {
            Zoom::Level(value)
        }
    }

    /// The zoom factor actually applied to the image.
    pub fn effective(self, fit_scale: f64) -> f64 {
        match self {
            Zoom::Fit => fit_scale,
            Zoom::Level(level) => level,
        }
    }

    /// Slider position representing this state.
    pub fn slider_value(self) -> f64 {
        match self {
            Zoom::Fit => 0.0,
            Zoom::Level(level) => level,
        }
    }
}

/// The image's placement relative to the container origin: top-left offset
/// plus uniform zoom.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageTransform {
    pub offset: Vec2,
    pub zoom: Zoom,
}

/// Largest scale no greater than 1 that fits the whole image inside the
/// viewport.
pub fn fit_scale(img_width: f64, img_height: f64, viewport: Viewport) -> f64 {
    let scale_x = viewport.width / img_width;
    let scale_y = viewport.height / img_height;
    scale_x.min(scale_y).min(1.0)
}

/// Offset that centers an image drawn at `scale` inside the viewport.
pub fn centered_offset(img_width: f64, img_height: f64, scale: f64, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (viewport.width - img_width * scale) / 2.0,
        (viewport.height - img_height * scale) / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(3.0, -1.0);
        let b = Vec2::new(0.5, 2.0);
        assert_eq!(a + b, Vec2::new(3.5, 1.0));
        assert_eq!(a - b, Vec2::new(2.5, -3.0));

        let mut c = a;
        c += b;
        assert_eq!(c, Vec2::new(3.5, 1.0));
    }

    #[test]
    fn test_viewport_measured() {
        assert!(!Viewport::default().is_measured());
        assert!(!Viewport::new(100.0, 0.0).is_measured());
        assert!(!Viewport::new(0.0, 100.0).is_measured());
        assert!(Viewport::new(250.0, 350.0).is_measured());
    }

    #[test]
    fn test_zoom_from_slider() {
        assert_eq!(Zoom::from_slider(0.0), Zoom::Fit);
        assert_eq!(Zoom::from_slider(1.5), Zoom::Level(1.5));
    }

    #[test]
    fn test_zoom_effective_resolves_fit() {
        assert_eq!(Zoom::Fit.effective(0.3125), 0.3125);
        assert_eq!(Zoom::Level(2.0).effective(0.3125), 2.0);
    }

    #[test]
    fn test_zoom_slider_round_trip() {
        assert_eq!(Zoom::Fit.slider_value(), 0.0);
        assert_eq!(Zoom::Level(0.7).slider_value(), 0.7);
        assert_eq!(Zoom::from_slider(Zoom::Fit.slider_value()), Zoom::Fit);
    }

    #[test]
    fn test_fit_scale_large_image() {
        // 800x600 image in a 250x350 container: width is the constraint
        let scale = fit_scale(800.0, 600.0, Viewport::new(250.0, 350.0));
        assert!((scale - 0.3125).abs() < 1e-12);
    }

    #[test]
    fn test_fit_scale_never_upscales() {
        // Small image in a large container stays at natural size
        let scale = fit_scale(100.0, 80.0, Viewport::new(500.0, 500.0));
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_fit_scale_tall_image() {
        // Height is the constraint
        let scale = fit_scale(200.0, 1000.0, Viewport::new(400.0, 500.0));
        assert!((scale - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_centered_offset_exact() {
        // 800x600 at 0.3125 inside 250x350: flush left, centered vertically
        let offset = centered_offset(800.0, 600.0, 0.3125, Viewport::new(250.0, 350.0));
        assert!((offset.x - 0.0).abs() < 1e-12);
        assert!((offset.y - 81.25).abs() < 1e-12);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
