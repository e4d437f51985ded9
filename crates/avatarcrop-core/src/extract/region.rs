//! The extraction loop: inverse mapping with bilinear sampling.
//!
//! For each destination pixel we compute the continuous source coordinate it
//! maps to under the stretch-to-fit transform and sample the source there.
//! Inverse mapping keeps the destination dense (no holes) regardless of how
//! the source rectangle is scaled or where it lies.

use crate::decode::SourceImage;
use crate::geometry::SourceRect;
use crate::CropShape;

/// Bytes per RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Extracts crop regions into a reusable scratch raster.
///
/// The scratch buffer is a shared resource across extractions for one
/// session; it is cleared (all transparent) at the start of every call, so a
/// result is only valid until the next call.
#[derive(Debug, Default)]
pub struct RegionExtractor {
    scratch: Vec<u8>,
}

impl RegionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the `source` region of `image`, stretched to exactly
    /// `out_width x out_height`, clipped to `shape`.
    ///
    /// Stretch-to-fit means whatever aspect distortion the mapping produces
    /// is kept; there is no letterboxing. Destination pixels whose source
    /// coordinate falls outside the image, and pixels outside the inscribed
    /// circle when `shape` is `Circle`, stay fully transparent.
    ///
    /// Returns `None` when the image is empty or the destination would be
    /// zero-sized (a not-yet-ready state, not an error).
    pub fn extract(
        &mut self,
        image: &SourceImage,
        source: &SourceRect,
        shape: CropShape,
        out_width: u32,
        out_height: u32,
    ) -> Option<&[u8]> {
        if image.is_empty() || out_width == 0 || out_height == 0 {
            return None;
        }

        let len = out_width as usize * out_height as usize * RGBA_CHANNELS;
        self.scratch.clear();
        self.scratch.resize(len, 0);

        // Source pixels advanced per destination pixel, per axis.
        let step_x = source.width / out_width as f64;
        let step_y = source.height / out_height as f64;

        let clip_cx = out_width as f64 / 2.0;
        let clip_cy = out_height as f64 / 2.0;
        let clip_r = out_width.min(out_height) as f64 / 2.0;
        let clip_r2 = clip_r * clip_r;

        for dst_y in 0..out_height {
            // Sample at destination pixel centers; the -0.5 shifts into the
            // pixel-centers-at-integers convention of the sampler.
            let src_y = source.y + (dst_y as f64 + 0.5) * step_y - 0.5;
            let row_start = dst_y as usize * out_width as usize * RGBA_CHANNELS;

            for dst_x in 0..out_width {
                if shape == CropShape::Circle {
                    let dx = dst_x as f64 + 0.5 - clip_cx;
                    let dy = dst_y as f64 + 0.5 - clip_cy;
                    if dx * dx + dy * dy > clip_r2 {
                        continue;
                    }
                }

                let src_x = source.x + (dst_x as f64 + 0.5) * step_x - 0.5;
                if let Some(pixel) = sample_bilinear(image, src_x, src_y) {
                    let idx = row_start + dst_x as usize * RGBA_CHANNELS;
                    self.scratch[idx..idx + RGBA_CHANNELS].copy_from_slice(&pixel);
                }
            }
        }

        Some(&self.scratch)
    }
}

/// Get a pixel as [f64; 4] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &SourceImage, px: usize, py: usize) -> [f64; 4] {
    let idx = (py * image.width as usize + px) * RGBA_CHANNELS;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
        image.pixels[idx + 3] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation, pixel centers at integer
/// coordinates.
///
/// Returns `None` when the coordinate lies outside the pixel grid (beyond
/// the half-pixel rim around the edge rows/columns); extraction renders that
/// as transparency. In-bounds samples clamp their neighborhood to the edge,
/// so border pixels are painted rather than dropped.
fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> Option<[u8; 4]> {
    let w = image.width as f64;
    let h = image.height as f64;

    if x <= -0.5 || x >= w - 0.5 || y <= -0.5 || y >= h - 0.5 {
        return None;
    }

    let xc = x.clamp(0.0, w - 1.0);
    let yc = y.clamp(0.0, h - 1.0);

    let x0 = xc.floor() as usize;
    let y0 = yc.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    // Fractional distances
    let fx = xc - x0 as f64;
    let fy = yc - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    // Bilinear interpolation formula
    let mut result = [0u8; 4];
    for (i, out) in result.iter_mut().enumerate() {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        *out = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(result)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
