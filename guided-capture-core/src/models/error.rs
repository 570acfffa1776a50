use thiserror::Error;

use super::permission::Capability;

/// Errors that can occur while acquiring permissions, capturing, or saving a photo.
///
/// None of these are fatal to the session: the controller folds every variant
/// into a reported outcome and returns to a usable state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("{0} permission denied")]
    PermissionDenied(Capability),

    #[error("aspect ratio discovery failed: {0}")]
    RatioDiscovery(String),

    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error("invalid photo: {0}")]
    InvalidPhoto(String),

    #[error("failed to save to library: {0}")]
    PersistenceFailed(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),
}

impl CaptureError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// Whether the error came out of the persistence step rather than the camera.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::PersistenceFailed(_))
    }
}
