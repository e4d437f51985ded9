//! Avatarcrop WASM - WebAssembly bindings for the avatarcrop engine
//!
//! This crate exposes the avatarcrop-core cropping engine to
//! JavaScript/TypeScript applications embedding the control.
//!
//! # Module Structure
//!
//! - `cropper` - The stateful `ProfileCropper` binding and standalone decode
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { ProfileCropper } from '@avatarcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const cropper = new ProfileCropper({ cropShape: "circle" });
//! cropper.measure(container.clientWidth, container.clientHeight);
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! cropper.load_file(file.type, bytes);
//! ```

use wasm_bindgen::prelude::*;

mod cropper;
mod types;

// Re-export public types
pub use cropper::{decode_image, ProfileCropper};
pub use types::JsSourceImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
