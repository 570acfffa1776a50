use crate::models::alert::Alert;
use crate::models::photo::{CaptureRecord, SavedAsset};
use crate::models::ratio::AspectRatio;
use crate::models::state::SessionState;

/// Event delegate for capture session notifications.
///
/// Called on whichever task drives the controller, never while the session
/// lock is held. Implementations should marshal to the UI thread if needed.
pub trait SessionDelegate: Send + Sync {
    /// Called on every state transition.
    fn on_state_changed(&self, state: &SessionState);

    /// Called once per camera mount after ratio negotiation.
    fn on_ratio_selected(&self, _ratio: &AspectRatio) {}

    /// Called when a blocking user-facing alert should be shown.
    fn on_alert(&self, alert: &Alert);

    /// Called after a photo has been written to the library.
    fn on_photo_saved(&self, _record: &CaptureRecord, _asset: &SavedAsset) {}
}
