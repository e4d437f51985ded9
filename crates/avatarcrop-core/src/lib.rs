//! Avatarcrop Core - profile-picture cropping engine
//!
//! This crate provides the geometry and raster engine behind an interactive
//! profile-picture cropping control: viewport/transform state, drag and zoom
//! interpretation, crop-to-source resolution, region extraction, and payload
//! encoding.
//!
//! The engine is deliberately UI-free. A rendering surface (see the
//! `avatarcrop-wasm` crate) feeds it raw input events and consumes the
//! computed state: image placement, the crop window, and the encoded payload.

pub mod decode;
pub mod encode;
pub mod extract;
pub mod geometry;
pub mod session;
pub mod validate;

pub use encode::EncodedPayload;
pub use geometry::{CropWindow, ImageTransform, SourceRect, Vec2, Viewport, Zoom};
pub use session::{CropSession, CroppedResult};
pub use validate::UploadPolicy;

use serde::{Deserialize, Serialize};

/// Clip shape applied when extracting the crop window's contents.
///
/// Purely an extraction/rendering parameter: the crop window itself is always
/// rectangular, and `Circle` only controls which destination pixels get
/// painted (plus the visual mask the surface shows).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropShape {
    /// Inscribed circle, centered, radius `min(width, height) / 2`.
    #[default]
    Circle,
    /// Unclipped square window.
    Square,
    /// Unclipped rectangular window.
    Rectangle,
}

/// Encoded format of the output payload.
///
/// The set is closed: configuration deserialization rejects anything else, so
/// an unrecognized format never reaches the encoding stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    /// MIME type of payloads encoded in this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// File extension used when naming a downloaded payload.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }
}

/// Geometry and output configuration for one cropping session.
///
/// Everything is optional with defaults matching the stock control.
/// Presentation concerns (texts, class names, theming) are not represented
/// here; they belong to the embedding surface, which keeps this struct the
/// complete input of the testable core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeometryConfig {
    /// Clip shape for extraction and the visual mask.
    pub crop_shape: CropShape,
    /// Width/height ratio of the crop window. Absent means a square window.
    pub aspect_ratio: Option<f64>,
    /// Encoding of the output payload.
    pub output_format: OutputFormat,
    /// Encoder quality, 0.0 to 1.0. Only JPEG output consumes it.
    pub output_quality: f64,
    /// Side length of the crop window in container pixels (its width; the
    /// height follows from `aspect_ratio`).
    pub size: f64,
    /// Fixed height of the cropping container in pixels.
    pub container_height: f64,
    /// Lower bound of the zoom slider. The slider minimum stands for the
    /// initial-fit scale, not a literal zero.
    pub min_zoom: f64,
    /// Upper bound of the zoom slider.
    pub max_zoom: f64,
    /// Step granularity of the zoom slider. Carried for the slider surface;
    /// the engine only clamps, it does not re-snap.
    pub zoom_step: f64,
    /// Whether zoom input is interpreted at all.
    pub allow_zoom: bool,
    /// Whether drag input is interpreted at all.
    pub allow_drag: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            crop_shape: CropShape::Circle,
            aspect_ratio: None,
            output_format: OutputFormat::Png,
            output_quality: 0.9,
            size: 250.0,
            container_height: 350.0,
            min_zoom: 0.0,
            max_zoom: 4.0,
            zoom_step: 0.1,
            allow_zoom: true,
            allow_drag: true,
        }
    }
}

impl GeometryConfig {
    /// Create a configuration with the stock defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Height of the crop window implied by `size` and `aspect_ratio`.
    pub fn crop_height(&self) -> f64 {
        match self.aspect_ratio {
            Some(ratio) => self.size / ratio,
            None => self.size,
        }
    }
}
