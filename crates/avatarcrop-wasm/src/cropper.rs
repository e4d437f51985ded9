//! The stateful cropper binding.
//!
//! `ProfileCropper` wraps one `CropSession` and is the surface an embedding
//! application talks to: it feeds raw input events in (file bytes, pointer
//! coordinates, slider values) and receives computed state back, both as
//! return values and through the registered callbacks.

use avatarcrop_core::session::{CropSession, CroppedResult, UploadError};
use avatarcrop_core::{GeometryConfig, UploadPolicy};
use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::types::JsSourceImage;

/// Interactive profile-picture cropping control.
///
/// Mouse and touch input share the same three pointer methods; the engine
/// has no notion of the input device. Every mutating call recomputes the
/// crop synchronously, so `payload()` is never stale once the call returns.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropper = new ProfileCropper({ cropShape: "circle", maxZoom: 4 });
/// cropper.set_on_crop_updated((area, payload) => preview.update(payload));
/// cropper.measure(container.clientWidth, container.clientHeight);
///
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// cropper.load_file(file.type, bytes);
/// ```
#[wasm_bindgen]
pub struct ProfileCropper {
    session: CropSession,
    on_crop_updated: Option<Function>,
    on_validation_error: Option<Function>,
}

#[wasm_bindgen]
impl ProfileCropper {
    /// Build a cropper from a plain configuration object.
    ///
    /// All keys are optional (camelCase, matching the component props:
    /// `cropShape`, `aspectRatio`, `outputFormat`, `outputQuality`, `size`,
    /// `containerHeight`, `minZoom`, `maxZoom`, `zoomStep`, `allowZoom`,
    /// `allowDrag`, `acceptedFileTypes`, `maxFileSizeMB`). An unrecognized
    /// crop shape or output format is a construction-time error.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ProfileCropper, JsValue> {
        let (geometry, policy) = if config.is_undefined() || config.is_null() {
            (GeometryConfig::default(), UploadPolicy::default())
        } else {
            let geometry: GeometryConfig = serde_wasm_bindgen::from_value(config.clone())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            let policy: UploadPolicy = serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            (geometry, policy)
        };

        Ok(ProfileCropper {
            session: CropSession::new(geometry, policy),
            on_crop_updated: None,
            on_validation_error: None,
        })
    }

    /// Register the crop-updated callback: `(area, payload?) => void`.
    ///
    /// Fired after every recompute with the crop window (an `{x, y, width,
    /// height}` object) and the encoded payload as a `Uint8Array` when one
    /// is available.
    pub fn set_on_crop_updated(&mut self, callback: Option<Function>) {
        self.on_crop_updated = callback;
    }

    /// Register the validation-error callback: `(message) => void`.
    ///
    /// Fired exactly once per rejected upload with the user-facing message.
    pub fn set_on_validation_error(&mut self, callback: Option<Function>) {
        self.on_validation_error = callback;
    }

    /// Report the container's measured size. Call again after layout
    /// changes; initialization defers until both dimensions are positive.
    pub fn measure(&mut self, width: f64, height: f64) {
        let result = self.session.measure_viewport(width, height);
        emit_crop_updated(self.on_crop_updated.as_ref(), result);
    }

    /// Feed the selected file's MIME type and bytes.
    ///
    /// Type/size rejections fire the validation-error callback and leave
    /// existing state untouched. Decode failures surface as the returned
    /// error.
    pub fn load_file(&mut self, mime: &str, bytes: &[u8]) -> Result<(), JsValue> {
        match self.session.load_upload(mime, bytes) {
            Ok(result) => {
                emit_crop_updated(self.on_crop_updated.as_ref(), result);
                Ok(())
            }
            Err(UploadError::Validation(e)) => {
                emit_validation_error(self.on_validation_error.as_ref(), &e.to_string());
                Ok(())
            }
            Err(e @ UploadError::Decode(_)) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Install an already-decoded image, e.g. from `decode_image` run in a
    /// worker. Fully resets prior geometry.
    pub fn set_image(&mut self, image: &JsSourceImage) {
        let result = self.session.install_image(image.to_source());
        emit_crop_updated(self.on_crop_updated.as_ref(), result);
    }

    /// Pointer pressed (mousedown / touchstart), container coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.session.drag_start(x, y);
    }

    /// Pointer moved while pressed (mousemove / touchmove).
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let result = self.session.drag_move(x, y);
        emit_crop_updated(self.on_crop_updated.as_ref(), result);
    }

    /// Pointer released (mouseup / mouseleave / touchend).
    pub fn pointer_up(&mut self) {
        self.session.drag_end();
    }

    /// Zoom slider moved.
    pub fn set_zoom(&mut self, value: f64) {
        let result = self.session.zoom_to(value);
        emit_crop_updated(self.on_crop_updated.as_ref(), result);
    }

    /// Slider position reflecting the current zoom state (the minimum
    /// stands for "initial fit").
    pub fn zoom_value(&self) -> f64 {
        self.session.zoom_value()
    }

    /// The zoom factor actually applied to the image, once ready.
    pub fn effective_scale(&self) -> Option<f64> {
        self.session.effective_scale()
    }

    /// An image is loaded and the geometry is initialized.
    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    /// The crop window as an `{x, y, width, height}` object.
    pub fn crop_area(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.session.crop_window()).unwrap_or(JsValue::NULL)
    }

    /// The resolved source rectangle of the latest computation, if any.
    pub fn source_rect(&self) -> JsValue {
        match self.session.latest() {
            Some(result) => {
                serde_wasm_bindgen::to_value(&result.source).unwrap_or(JsValue::NULL)
            }
            None => JsValue::NULL,
        }
    }

    /// The latest encoded payload bytes, if any.
    pub fn payload(&self) -> Option<Vec<u8>> {
        self.session
            .latest()
            .and_then(|result| result.payload.as_ref())
            .map(|payload| payload.bytes.clone())
    }

    /// MIME type of the payload bytes.
    pub fn payload_mime(&self) -> Option<String> {
        self.session
            .latest()
            .and_then(|result| result.payload.as_ref())
            .map(|payload| payload.mime_type().to_string())
    }

    /// Claim the latest payload for saving and set the busy flag.
    ///
    /// Returns the bytes to hand to the save handler, or `undefined` when
    /// already saving or nothing is ready. The embedder must call
    /// `finish_save` (or `report_save_error`) when its handler settles.
    pub fn begin_save(&mut self) -> Option<Vec<u8>> {
        self.session.begin_save().map(|payload| payload.bytes)
    }

    /// Clear the save busy flag after the handler resolved.
    pub fn finish_save(&mut self) {
        self.session.finish_save();
    }

    /// Report a rejected save handler.
    ///
    /// Logs to the console and still clears the busy flag; a failing
    /// handler must never leave the control wedged.
    pub fn report_save_error(&mut self, message: &str) {
        web_sys::console::error_1(&JsValue::from_str(&format!(
            "Error saving image: {message}"
        )));
        self.session.finish_save();
    }

    /// A save is in flight.
    pub fn is_saving(&self) -> bool {
        self.session.is_saving()
    }

    /// Download name for the default save path, e.g. `profile-picture.png`.
    pub fn suggested_file_name(&self) -> String {
        self.session.suggested_file_name()
    }
}

/// Decode an uploaded file's bytes into a JS-visible image.
///
/// For embeddings that decode off the main thread: run this in a worker,
/// then hand the result to `ProfileCropper.set_image`.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    avatarcrop_core::decode::decode_upload(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Invoke the crop-updated callback with the freshly computed result.
fn emit_crop_updated(callback: Option<&Function>, result: Option<&CroppedResult>) {
    let (Some(callback), Some(result)) = (callback, result) else {
        return;
    };
    let area = serde_wasm_bindgen::to_value(&result.area).unwrap_or(JsValue::NULL);
    let payload: JsValue = match result.payload.as_ref() {
        Some(payload) => js_sys::Uint8Array::from(payload.bytes.as_slice()).into(),
        None => JsValue::UNDEFINED,
    };
    // A throwing callback is the embedder's bug; it must not poison the
    // input event that triggered the recompute.
    let _ = callback.call2(&JsValue::NULL, &area, &payload);
}

/// Invoke the validation-error callback with the user-facing message.
fn emit_validation_error(callback: Option<&Function>, message: &str) {
    let Some(callback) = callback else {
        return;
    };
    let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(message));
}

/// Tests for the cropper binding.
///
/// Note: methods touching `JsValue` (constructor, callbacks) only run on
/// wasm32 targets; see the `wasm_tests` module below. The session behavior
/// itself is covered natively in `avatarcrop_core::session`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_image_feeds_session() {
        let img = JsSourceImage::new(8, 6, vec![200u8; 8 * 6 * 4]);
        let source = img.to_source();

        let mut session = CropSession::with_defaults();
        session.measure_viewport(250.0, 350.0);
        session.install_image(source);

        assert!(session.is_ready());
        assert_eq!(session.image().unwrap().width, 8);
    }

    #[test]
    fn test_decode_image_maps_core_errors() {
        // Native targets can still exercise the core decode path directly
        let result = avatarcrop_core::decode::decode_upload(&[0x00, 0x01]);
        assert!(result.is_err());
    }
}
