//! Geometry engine: viewport/transform state, input interpretation, and
//! crop-to-source resolution.
//!
//! Everything in this module is pure math over container coordinates (origin
//! at the container's top-left, x right, y down) and source-image pixel
//! coordinates. No I/O, no failure paths: fallibility lives at the decode
//! and encode boundaries.

mod drag;
mod resolve;
mod transform;
mod window;
mod zoom;

pub use drag::DragSession;
pub use resolve::{resolve_source_rect, SourceRect};
pub use transform::{centered_offset, fit_scale, ImageTransform, Vec2, Viewport, Zoom};
pub use window::CropWindow;
pub use zoom::rescale_about_crop_center;
