use super::error::CaptureError;

/// Capture session state machine.
///
/// State transitions:
/// ```text
/// uninitialized → awaiting-camera-permission → awaiting-readiness → ready
///                           ↑                                        ↓  ↑
///                           └──── permission revoked ────────── capturing
///                                                                  ↓     ↑
///                                                            capture-failed
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    AwaitingCameraPermission,
    AwaitingReadiness,
    Ready,
    Capturing,
    CaptureFailed(CaptureError),
}

impl SessionState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::Capturing)
    }

    /// The view renders the permission request affordance in this state and nowhere else.
    pub fn shows_permission_affordance(&self) -> bool {
        matches!(self, Self::AwaitingCameraPermission)
    }

    /// Whether the viewfinder (camera + overlay) should be mounted.
    pub fn shows_viewfinder(&self) -> bool {
        matches!(
            self,
            Self::AwaitingReadiness | Self::Ready | Self::Capturing | Self::CaptureFailed(_)
        )
    }
}
