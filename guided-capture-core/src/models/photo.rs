use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::CaptureError;
use super::ratio::AspectRatio;

/// Embedded image metadata (EXIF tags) as reported by the camera.
pub type ExifMap = BTreeMap<String, serde_json::Value>;

/// Opaque handle to captured image data (usually a `file://` URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileReference(String);

impl FileReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which physical camera a capture uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Front => "front",
        }
    }
}

/// Options passed to the camera's still-capture operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// JPEG quality in `0.0..=1.0` (default: 1.0).
    pub quality: f32,

    /// Ask the driver for the unprocessed frame (default: true).
    pub skip_processing: bool,

    /// Ask the driver to attach EXIF metadata (default: true).
    pub exif: bool,

    /// Camera to shoot with (default: back).
    pub facing: CameraFacing,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            quality: 1.0,
            skip_processing: true,
            exif: true,
            facing: CameraFacing::Back,
        }
    }
}

/// A still image returned by the camera.
///
/// Lives for exactly one capture-to-save transaction; the controller moves it
/// into the media store and keeps nothing afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPhoto {
    pub file_reference: FileReference,
    pub width: u32,
    pub height: u32,
    pub exif: Option<ExifMap>,
}

impl CapturedPhoto {
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::InvalidPhoto(format!(
                "non-positive dimensions {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Identity of a photo after it has been written to the media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAsset {
    pub id: String,
    pub uri: String,
}

/// Audit record of a single successful capture.
///
/// Emitted to the log and to delegates; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub id: String,
    pub captured_at: DateTime<Utc>,
    pub file_reference: FileReference,
    pub width: u32,
    pub height: u32,
    pub ratio: AspectRatio,
    pub exif: Option<ExifMap>,
}

impl CaptureRecord {
    pub fn from_photo(photo: &CapturedPhoto, ratio: &AspectRatio) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            captured_at: Utc::now(),
            file_reference: photo.file_reference.clone(),
            width: photo.width,
            height: photo.height,
            ratio: ratio.clone(),
            exif: photo.exif.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}
