//! Upload validation: type and size checks ahead of decoding.
//!
//! Validation runs on the metadata the file picker hands over (MIME type and
//! byte length), before any bytes are decoded. A rejected upload never
//! touches existing image or crop state; the embedding surface reports the
//! message and the session carries on with whatever was loaded before.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upper size limit for uploads, in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 5.0;

/// What the control accepts from the file picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// MIME filter handed to the file-picker surface (its `accept`
    /// attribute). The engine-side check is the `image/` prefix test below.
    #[serde(rename = "acceptedFileTypes")]
    pub accepted_types: String,
    /// Upper size limit for an uploaded file, in megabytes.
    #[serde(rename = "maxFileSizeMB")]
    pub max_file_size_mb: f64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            accepted_types: "image/*".to_string(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

/// A rejected upload. The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The selected file is not an image at all.
    #[error("Please upload an image file")]
    NotAnImage,

    /// The selected file exceeds the configured size limit.
    #[error("Image must be less than {limit_mb}MB")]
    TooLarge { limit_mb: f64 },
}

/// Check an upload's MIME type and byte length against the policy.
pub fn check_upload(
    mime: &str,
    byte_len: usize,
    policy: &UploadPolicy,
) -> Result<(), ValidationError> {
    if !mime.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }

    let limit = policy.max_file_size_mb * 1024.0 * 1024.0;
    if byte_len as f64 > limit {
        return Err(ValidationError::TooLarge {
            limit_mb: policy.max_file_size_mb,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_image_types() {
        let policy = UploadPolicy::default();
        assert!(check_upload("image/png", 1024, &policy).is_ok());
        assert!(check_upload("image/jpeg", 1024, &policy).is_ok());
        assert!(check_upload("image/gif", 1024, &policy).is_ok());
        assert!(check_upload("image/webp", 1024, &policy).is_ok());
    }

    #[test]
    fn test_rejects_non_image_types() {
        let policy = UploadPolicy::default();
        let result = check_upload("application/pdf", 1024, &policy);
        assert_eq!(result, Err(ValidationError::NotAnImage));

        let result = check_upload("text/plain", 10, &policy);
        assert_eq!(result, Err(ValidationError::NotAnImage));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let policy = UploadPolicy::default();
        let six_mb = 6 * 1024 * 1024;
        let result = check_upload("image/png", six_mb, &policy);
        assert_eq!(result, Err(ValidationError::TooLarge { limit_mb: 5.0 }));
    }

    #[test]
    fn test_accepts_file_at_exact_limit() {
        let policy = UploadPolicy::default();
        let five_mb = 5 * 1024 * 1024;
        assert!(check_upload("image/png", five_mb, &policy).is_ok());
    }

    #[test]
    fn test_custom_limit() {
        let policy = UploadPolicy {
            max_file_size_mb: 2.0,
            ..Default::default()
        };
        assert!(check_upload("image/png", 1024 * 1024, &policy).is_ok());
        assert_eq!(
            check_upload("image/png", 3 * 1024 * 1024, &policy),
            Err(ValidationError::TooLarge { limit_mb: 2.0 })
        );
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            ValidationError::NotAnImage.to_string(),
            "Please upload an image file"
        );
        assert_eq!(
            ValidationError::TooLarge { limit_mb: 5.0 }.to_string(),
            "Image must be less than 5MB"
        );
        assert_eq!(
            ValidationError::TooLarge { limit_mb: 2.5 }.to_string(),
            "Image must be less than 2.5MB"
        );
    }

    #[test]
    fn test_type_check_runs_before_size_check() {
        // A huge non-image reports the type problem, not the size
        let policy = UploadPolicy::default();
        let result = check_upload("video/mp4", 100 * 1024 * 1024, &policy);
        assert_eq!(result, Err(ValidationError::NotAnImage));
    }
}
