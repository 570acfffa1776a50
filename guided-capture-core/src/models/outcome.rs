use super::error::CaptureError;
use super::photo::{CaptureRecord, SavedAsset};

/// Why a capture request was turned away without touching the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Session has not reached `Ready` (no permission or camera not mounted).
    NotReady,
    /// Camera has not signalled readiness for the current mount.
    CameraCold,
    /// Another capture is still in flight.
    Busy,
}

/// Result of one capture request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Saved(SavedAsset),
    Rejected(RejectReason),
    Failed(CaptureError),
}

impl CaptureOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn error(&self) -> Option<&CaptureError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Counters for debugging capture sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDiagnostics {
    pub captures_requested: u64,
    pub captures_rejected: u64,
    pub captures_saved: u64,
    pub captures_failed: u64,
    pub permission_denials: u64,
    pub ratio_discovery_failures: u64,
    pub last_error: Option<CaptureError>,
    pub last_record: Option<CaptureRecord>,
}
