//! Event-driven session state for one cropping control instance.
//!
//! `CropSession` owns every piece of mutable state exclusively: the
//! configuration, the measured viewport, the loaded image and its cached
//! fit scale, the transform, the crop window, the live drag session, the
//! extractor scratch, the latest result, and the save busy flag.
//!
//! All mutation is synchronous inside the event-shaped methods. Every
//! transform-mutating operation resolves, extracts, and encodes before it
//! returns, so a consumer never observes a stale result between input
//! events. Operations invoked before an image is loaded and the viewport is
//! measured are silent no-ops returning `None`.

use thiserror::Error;

use crate::decode::{decode_upload, DecodeError, SourceImage};
use crate::encode::{encode, EncodedPayload};
use crate::extract::RegionExtractor;
use crate::geometry::{
    centered_offset, fit_scale, rescale_about_crop_center, resolve_source_rect, CropWindow,
    DragSession, ImageTransform, SourceRect, Vec2, Viewport, Zoom,
};
use crate::validate::{check_upload, UploadPolicy, ValidationError};
use crate::GeometryConfig;

/// Why an upload was rejected before becoming the session image.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The type or size check failed; the message is user-facing.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The bytes passed validation but could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// The latest crop computation.
///
/// Regenerated after every transform or crop-window mutation; the newest
/// value is what a save hands to the embedding application, and what a live
/// preview displays.
#[derive(Debug, Clone, PartialEq)]
pub struct CroppedResult {
    /// The crop window, in container coordinates.
    pub area: CropWindow,
    /// The resolved source rectangle, in source pixel coordinates.
    pub source: SourceRect,
    /// The encoded output. `None` while encoding is unavailable.
    pub payload: Option<EncodedPayload>,
}

/// State machine for one cropping control.
pub struct CropSession {
    geometry: GeometryConfig,
    policy: UploadPolicy,
    viewport: Viewport,
    image: Option<SourceImage>,
    /// Initial-fit scale, computed once per loaded image. `None` doubles as
    /// "initialization still pending".
    fit: Option<f64>,
    transform: ImageTransform,
    crop: CropWindow,
    drag: Option<DragSession>,
    extractor: RegionExtractor,
    latest: Option<CroppedResult>,
    saving: bool,
}

impl CropSession {
    /// Create a session from configuration. No image is loaded and the
    /// viewport is unmeasured; the pipeline stays inert until both arrive.
    pub fn new(geometry: GeometryConfig, policy: UploadPolicy) -> Self {
        let crop = CropWindow::sized(geometry.size, geometry.aspect_ratio);
        Self {
            geometry,
            policy,
            viewport: Viewport::default(),
            image: None,
            fit: None,
            transform: ImageTransform::default(),
            crop,
            drag: None,
            extractor: RegionExtractor::new(),
            latest: None,
            saving: false,
        }
    }

    /// Create a session with the stock configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeometryConfig::default(), UploadPolicy::default())
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn crop_window(&self) -> CropWindow {
        self.crop
    }

    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// The newest crop computation, if the pipeline has run at all.
    pub fn latest(&self) -> Option<&CroppedResult> {
        self.latest.as_ref()
    }

    /// An image is loaded and initialization has run.
    pub fn is_ready(&self) -> bool {
        self.image.is_some() && self.fit.is_some()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// The zoom factor currently applied to the image.
    pub fn effective_scale(&self) -> Option<f64> {
        self.fit.map(|fit| self.transform.zoom.effective(fit))
    }

    /// Slider position reflecting the stored zoom state.
    pub fn zoom_value(&self) -> f64 {
        self.transform.zoom.slider_value()
    }

    /// Report the container's measured size.
    ///
    /// Initialization is deferred until both dimensions are positive, then
    /// retried here; a container that was not laid out yet simply reports
    /// again once it is.
    pub fn measure_viewport(&mut self, width: f64, height: f64) -> Option<&CroppedResult> {
        self.viewport = Viewport::new(width, height);
        self.try_initialize()
    }

    /// Validate, decode, and install an uploaded file.
    ///
    /// On rejection the previous image and crop state stay untouched.
    /// Ignored while a save is in flight, mirroring the disabled
    /// file-change control.
    pub fn load_upload(
        &mut self,
        mime: &str,
        bytes: &[u8],
    ) -> Result<Option<&CroppedResult>, UploadError> {
        if self.saving {
            return Ok(None);
        }
        check_upload(mime, bytes.len(), &self.policy)?;
        let image = decode_upload(bytes)?;
        Ok(self.install_image(image))
    }

    /// Replace the session image, discarding all prior geometry: zoom back
    /// to fit, drag session gone, nothing of the old transform survives.
    pub fn install_image(&mut self, image: SourceImage) -> Option<&CroppedResult> {
        self.image = Some(image);
        self.fit = None;
        self.transform = ImageTransform::default();
        self.drag = None;
        self.latest = None;
        self.try_initialize()
    }

    /// Pointer pressed. No-ops when dragging is disabled by configuration
    /// or nothing is loaded yet.
    pub fn drag_start(&mut self, x: f64, y: f64) {
        if !self.geometry.allow_drag || !self.is_ready() {
            return;
        }
        self.drag = Some(DragSession::begin(Vec2::new(x, y)));
    }

    /// Pointer moved while pressed.
    ///
    /// Translates the image by the raw pointer delta and recomputes; zoom
    /// affects how big the image renders, never how fast it drags.
    pub fn drag_move(&mut self, x: f64, y: f64) -> Option<&CroppedResult> {
        if !self.geometry.allow_drag {
            return None;
        }
        let drag = self.drag.as_mut()?;
        let delta = drag.advance(Vec2::new(x, y));
        self.transform.offset += delta;
        self.recompute()
    }

    /// Pointer released. Idempotent: releasing twice, or without a prior
    /// drag-start, is a no-op both times.
    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    /// Zoom slider moved.
    ///
    /// Clamps the value into `[min_zoom, max_zoom]` and rescales about the
    /// crop-window center, keeping the point the user is looking at fixed.
    /// The slider minimum maps back to the fit state.
    pub fn zoom_to(&mut self, value: f64) -> Option<&CroppedResult> {
        if !self.geometry.allow_zoom || !self.is_ready() {
            return None;
        }
        let fit = self.fit?;
        let image = self.image.as_ref()?;

        let clamped = value.clamp(self.geometry.min_zoom, self.geometry.max_zoom);
        self.transform = rescale_about_crop_center(
            self.transform,
            image.width as f64,
            image.height as f64,
            fit,
            Zoom::from_slider(clamped),
            self.crop.center(),
        );
        self.recompute()
    }

    /// Claim the latest payload for saving.
    ///
    /// Sets the busy flag and refuses re-entry until [`finish_save`] runs.
    /// Returns `None` when already saving or when there is nothing to save.
    ///
    /// [`finish_save`]: CropSession::finish_save
    pub fn begin_save(&mut self) -> Option<EncodedPayload> {
        if self.saving {
            return None;
        }
        let payload = self.latest.as_ref()?.payload.clone()?;
        self.saving = true;
        Some(payload)
    }

    /// Release the save busy flag.
    ///
    /// Called on success and failure alike; a rejecting save handler must
    /// never leave the control wedged.
    pub fn finish_save(&mut self) {
        self.saving = false;
    }

    /// Download name for the default save path.
    pub fn suggested_file_name(&self) -> String {
        format!(
            "profile-picture.{}",
            self.geometry.output_format.extension()
        )
    }

    /// Run fit-and-center once the image and a measured viewport are both
    /// present. Safe to call repeatedly; it only acts while initialization
    /// is pending.
    fn try_initialize(&mut self) -> Option<&CroppedResult> {
        if self.fit.is_some() {
            return self.latest.as_ref();
        }
        if !self.viewport.is_measured() {
            return None;
        }
        let image = self.image.as_ref()?;

        let (img_w, img_h) = (image.width as f64, image.height as f64);
        let fit = fit_scale(img_w, img_h, self.viewport);
        self.fit = Some(fit);

        let effective = self.transform.zoom.effective(fit);
        self.transform.offset = centered_offset(img_w, img_h, effective, self.viewport);
        self.crop.center_in(self.viewport);

        self.recompute()
    }

    /// Resolve the source rectangle, extract, and encode, synchronously
    /// inside the mutating event, so no stale result is ever observable.
    fn recompute(&mut self) -> Option<&CroppedResult> {
        let effective = self.effective_scale()?;
        let image = self.image.as_ref()?;
        let source = resolve_source_rect(self.transform.offset, effective, &self.crop);

        let shape = self.geometry.crop_shape;
        let format = self.geometry.output_format;
        let quality = self.geometry.output_quality;
        let out_width = self.crop.width.round() as u32;
        let out_height = self.crop.height.round() as u32;

        let payload = self
            .extractor
            .extract(image, &source, shape, out_width, out_height)
            .and_then(|raster| encode(raster, out_width, out_height, format, quality).ok())
            .map(|bytes| EncodedPayload { format, bytes });

        self.latest = Some(CroppedResult {
            area: self.crop,
            source,
            payload,
        });
        self.latest.as_ref()
    }
}
