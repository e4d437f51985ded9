//! Upload decoding for the cropping engine.
//!
//! Uploaded files arrive as raw bytes from the embedding surface's file
//! reader. This module turns them into a [`SourceImage`]: format-guessed
//! decode (JPEG, PNG, GIF, WebP), EXIF orientation correction, and
//! conversion to RGBA.
//!
//! Decoding is the first of the two suspension points in the event flow;
//! until it completes, the transform/crop pipeline must not run.

mod types;
mod upload;

pub use types::{DecodeError, Orientation, SourceImage};
pub use upload::{decode_upload, get_orientation};
