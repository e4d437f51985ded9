//! Region extraction: drawing a source rectangle onto the fixed-size output
//! raster.
//!
//! The destination raster always has the crop window's pixel dimensions,
//! whatever the zoom level; zoom only changes which source region stretches
//! onto it. Source coordinates outside the image and pixels outside a circle
//! clip stay transparent.

mod region;

pub use region::{RegionExtractor, RGBA_CHANNELS};
