use super::photo::SavedAsset;

/// Copy shown in place of the viewfinder while camera access is missing.
pub const CAMERA_PERMISSION_TEXT: &str = "Camera permission is required to take pig photos.";
pub const CAMERA_PERMISSION_ACTION: &str = "Grant Permission";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    PermissionNeeded,
    PhotoSaved,
    CaptureError,
}

/// A blocking user-facing message raised by the capture pipeline.
///
/// Messages stay generic; diagnostic detail goes to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn permission_needed() -> Self {
        Self {
            kind: AlertKind::PermissionNeeded,
            title: "Permission needed".into(),
            message: "Storage permission is required to save photos.".into(),
        }
    }

    pub fn photo_saved(asset: &SavedAsset) -> Self {
        Self {
            kind: AlertKind::PhotoSaved,
            title: "Photo saved".into(),
            message: format!("Saved to library. URI: {}", asset.uri),
        }
    }

    pub fn capture_error() -> Self {
        Self {
            kind: AlertKind::CaptureError,
            title: "Capture error".into(),
            message: "Could not save photo. Please try again.".into(),
        }
    }
}
