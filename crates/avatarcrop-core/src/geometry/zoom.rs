//! Zoom interpretation: center-anchored rescaling.
//!
//! Rescaling about the image origin makes the image lurch away from the
//! point the user is looking at. The interpreter instead keeps the image
//! point under the crop-window center fixed across the scale change:
//!
//! ```text
//! visible_center = crop_center - offset            (scaled image space)
//! ratio          = visible_center / (natural * old_effective)
//! new_offset     = crop_center - ratio * (natural * new_effective)
//! ```
//!
//! The ratio (the fraction of the image spanned on each axis) is the
//! invariant: it is identical before and after the call.

use super::{ImageTransform, Vec2, Zoom};

/// Rescale the image about the crop-window center.
///
/// `fit_scale` is the cached initial-fit scale used to resolve `Zoom::Fit`
/// on both sides of the change. The returned transform carries `new_zoom`
/// as stored (possibly `Fit`) and the offset that keeps the crop-center
/// point stationary.
pub fn rescale_about_crop_center(
    transform: ImageTransform,
    natural_width: f64,
    natural_height: f64,
    fit_scale: f64,
    new_zoom: Zoom,
    crop_center: Vec2,
) -> ImageTransform {
    let old_effective = transform.zoom.effective(fit_scale);
    let new_effective = new_zoom.effective(fit_scale);

    // Point currently under the crop-window center, in scaled image space.
    let visible_center = crop_center - transform.offset;

    // Fraction of the scaled image spanned on each axis.
    let ratio_x = visible_center.x / (natural_width * old_effective);
    let ratio_y = visible_center.y / (natural_height * old_effective);

    // The same fraction at the new scale locates the new center displacement.
    let new_center = Vec2::new(
        ratio_x * (natural_width * new_effective),
        ratio_y * (natural_height * new_effective),
    );

    ImageTransform {
        offset: crop_center - new_center,
        zoom: new_zoom,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
