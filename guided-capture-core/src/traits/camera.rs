use async_trait::async_trait;

use crate::models::error::CaptureError;
use crate::models::photo::{CaptureOptions, CapturedPhoto};
use crate::models::ratio::AspectRatio;
use crate::traits::permission_provider::PermissionProvider;

/// Interface for the platform camera backing the viewfinder.
///
/// The controller owns the camera exclusively. Readiness is not polled: the
/// host forwards the driver's ready callback to
/// `CaptureSessionController::on_camera_ready`.
#[async_trait]
pub trait CameraDevice: PermissionProvider {
    /// Supported aspect ratios in the order the driver reports them (may be empty).
    async fn supported_ratios(&self) -> Result<Vec<AspectRatio>, CaptureError>;

    /// Take one still image. Fails with `CaptureFailed` when the hardware is
    /// busy or declines. Any timeout is the implementation's responsibility.
    async fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError>;
}
