use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::alert::Alert;
use crate::models::config::SessionConfiguration;
use crate::models::error::CaptureError;
use crate::models::outcome::{CaptureOutcome, RejectReason, SessionDiagnostics};
use crate::models::permission::{Capability, PermissionState};
use crate::models::photo::{CaptureRecord, SavedAsset};
use crate::models::ratio::AspectRatio;
use crate::models::state::SessionState;
use crate::overlay::{render_overlay, GuideOverlay, OverlayLayout, Viewport};
use crate::session::permission_gate::PermissionGate;
use crate::traits::camera::CameraDevice;
use crate::traits::media_store::MediaStore;
use crate::traits::session_delegate::SessionDelegate;

/// Internal mutable session state, protected by `parking_lot::Mutex`.
///
/// The lock is only ever taken between suspension points.
struct ControllerState {
    state: SessionState,
    camera_ready: bool,
    /// Set while a capture pipeline owns the camera; cleared only by that pipeline.
    capture_in_flight: bool,
    selected_ratio: AspectRatio,
    diagnostics: SessionDiagnostics,
}

/// Drives permission acquisition, camera readiness, ratio negotiation and
/// the capture → save pipeline for a single viewfinder.
///
/// Generic over the camera and media-store backends. All operations take
/// `&self`: callers on one cooperative executor may interleave them freely,
/// and the controller guarantees at most one capture in flight.
///
/// ```text
/// start() ─→ [camera permission] ─→ on_camera_ready() ─→ [ratio negotiation] ─→ Ready
/// capture() ─→ [media permission, lazily] ─→ [camera.capture] ─→ [media_store.save] ─→ Ready
/// ```
pub struct CaptureSessionController<C: CameraDevice, M: MediaStore> {
    camera: C,
    media_store: M,
    config: SessionConfiguration,
    overlay_layout: OverlayLayout,
    permissions: PermissionGate,
    inner: Mutex<ControllerState>,
    delegates: Mutex<Vec<Arc<dyn SessionDelegate>>>,
}

impl<C: CameraDevice, M: MediaStore> CaptureSessionController<C, M> {
    pub fn new(camera: C, media_store: M, config: SessionConfiguration) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;

        Ok(Self {
            camera,
            media_store,
            inner: Mutex::new(ControllerState {
                state: SessionState::Uninitialized,
                camera_ready: false,
                capture_in_flight: false,
                selected_ratio: config.desired_ratio.clone(),
                diagnostics: SessionDiagnostics::default(),
            }),
            config,
            overlay_layout: OverlayLayout::default(),
            permissions: PermissionGate::new(),
            delegates: Mutex::new(Vec::new()),
        })
    }

    pub fn set_overlay_layout(&mut self, layout: OverlayLayout) -> Result<(), CaptureError> {
        layout.validate().map_err(CaptureError::ConfigurationFailed)?;
        self.overlay_layout = layout;
        Ok(())
    }

    /// Register an observer. Delegates are notified in registration order.
    pub fn add_delegate(&self, delegate: Arc<dyn SessionDelegate>) {
        self.delegates.lock().push(delegate);
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state.clone()
    }

    pub fn selected_ratio(&self) -> AspectRatio {
        self.inner.lock().selected_ratio.clone()
    }

    pub fn is_camera_ready(&self) -> bool {
        self.inner.lock().camera_ready
    }

    /// Backend access for inspection. Captures must go through [`Self::capture`]
    /// so the single-flight guarantee holds.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn media_store(&self) -> &M {
        &self.media_store
    }

    pub fn permissions(&self) -> &PermissionGate {
        &self.permissions
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn diagnostics(&self) -> SessionDiagnostics {
        self.inner.lock().diagnostics.clone()
    }

    /// Guide geometry for the current viewport.
    pub fn overlay(&self, viewport: Viewport) -> GuideOverlay {
        render_overlay(viewport, &self.overlay_layout)
    }

    /// Begin the session. Transitions: uninitialized → awaiting-camera-permission
    /// → awaiting-readiness (if granted).
    ///
    /// Media-store permission is not requested here; the first capture asks for it.
    pub async fn start(&self) -> SessionState {
        if !matches!(self.state(), SessionState::Uninitialized) {
            return self.state();
        }
        self.request_camera_permission().await
    }

    /// Ask for camera access. Bound to the permission affordance's action.
    pub async fn request_camera_permission(&self) -> SessionState {
        self.transition(|s| matches!(s, SessionState::Uninitialized), SessionState::AwaitingCameraPermission);
        if !matches!(self.state(), SessionState::AwaitingCameraPermission) {
            return self.state();
        }

        match self.permissions.request_camera(&self.camera).await {
            PermissionState::Granted => {
                self.transition(
                    |s| matches!(s, SessionState::AwaitingCameraPermission),
                    SessionState::AwaitingReadiness,
                );
            }
            PermissionState::Denied => {
                let mut inner = self.inner.lock();
                inner.diagnostics.permission_denials += 1;
                inner.diagnostics.last_error = Some(CaptureError::PermissionDenied(Capability::Camera));
            }
            _ => {}
        }
        self.state()
    }

    /// Readiness callback from the camera driver, fired once per mount.
    ///
    /// Runs ratio negotiation and transitions awaiting-readiness → ready.
    /// Failure to discover ratios is not fatal: the current ratio is kept.
    /// A remount that completes while a capture is still running is recorded,
    /// and the capture settles into `Ready` when it finishes.
    pub async fn on_camera_ready(&self) {
        {
            let mut inner = self.inner.lock();
            let accepts = match inner.state {
                SessionState::AwaitingReadiness => true,
                SessionState::Capturing | SessionState::CaptureFailed(_) => inner.capture_in_flight,
                _ => false,
            };
            if !accepts || inner.camera_ready {
                log::debug!("Ignoring camera ready callback in state {:?}", inner.state);
                return;
            }
            inner.camera_ready = true;
        }

        let mut pending = InFlight::new(self, InFlightKind::Negotiation);
        let current = self.selected_ratio();
        let ratio = match self.camera.supported_ratios().await {
            Ok(supported) => {
                log::debug!("Supported ratios: {:?}", supported);
                if supported.is_empty() {
                    log::info!("Camera reported no supported ratios, keeping {}", current);
                }
                AspectRatio::negotiate(&self.config.desired_ratio, &supported, &current)
            }
            Err(e) => {
                log::warn!("Error fetching supported ratios: {}", e);
                self.inner.lock().diagnostics.ratio_discovery_failures += 1;
                current
            }
        };
        pending.disarm();
        self.finish_negotiation(ratio);
    }

    /// The viewfinder was torn down; the next mount fires `on_camera_ready` again.
    pub fn on_camera_unmounted(&self) {
        let changed = {
            let mut inner = self.inner.lock();
            inner.camera_ready = false;
            let remount = matches!(
                inner.state,
                SessionState::Ready | SessionState::CaptureFailed(_)
            );
            if remount {
                inner.state = SessionState::AwaitingReadiness;
            }
            remount
        };
        if changed {
            self.notify_state(&SessionState::AwaitingReadiness);
        }
    }

    /// The host reported that camera access was withdrawn.
    ///
    /// A capture already in flight runs to completion but cannot settle back
    /// into `Ready`; the session waits for a new grant.
    pub fn on_camera_permission_revoked(&self) {
        self.permissions.revoke(Capability::Camera);
        {
            let mut inner = self.inner.lock();
            inner.camera_ready = false;
            inner.state = SessionState::AwaitingCameraPermission;
        }
        self.notify_state(&SessionState::AwaitingCameraPermission);
    }

    /// Take one photo and save it to the library.
    ///
    /// Rejected without side effects unless the session is ready and the
    /// camera is warm; a request while another capture is in flight is
    /// rejected as busy, whatever state the session has moved to since.
    /// Every accepted request ends back in `Ready` unless the camera was
    /// unmounted or its permission revoked meanwhile.
    pub async fn capture(&self) -> CaptureOutcome {
        {
            let mut inner = self.inner.lock();
            inner.diagnostics.captures_requested += 1;
            let rejection = match inner.state {
                _ if inner.capture_in_flight => Some(RejectReason::Busy),
                SessionState::Capturing | SessionState::CaptureFailed(_) => Some(RejectReason::Busy),
                SessionState::Ready if !inner.camera_ready => Some(RejectReason::CameraCold),
                SessionState::Ready => None,
                _ => Some(RejectReason::NotReady),
            };
            if let Some(reason) = rejection {
                inner.diagnostics.captures_rejected += 1;
                log::debug!("Capture rejected ({:?}) in state {:?}", reason, inner.state);
                return CaptureOutcome::Rejected(reason);
            }
            inner.state = SessionState::Capturing;
            inner.capture_in_flight = true;
        }
        self.notify_state(&SessionState::Capturing);

        let mut pending = InFlight::new(self, InFlightKind::Capture);
        let outcome = self.run_pipeline().await;
        pending.disarm();
        outcome
    }

    async fn run_pipeline(&self) -> CaptureOutcome {
        if !self.permissions.is_media_store_granted()
            && !self.permissions.request_media_store(&self.media_store).await.is_granted()
        {
            let err = CaptureError::PermissionDenied(Capability::MediaStore);
            log::warn!("Media library permission not granted, capture aborted");
            {
                let mut inner = self.inner.lock();
                inner.diagnostics.permission_denials += 1;
                inner.diagnostics.last_error = Some(err.clone());
            }
            self.notify_alert(&Alert::permission_needed());
            self.settle();
            return CaptureOutcome::Failed(err);
        }

        let ratio = self.selected_ratio();
        let photo = match self.camera.capture(&self.config.capture_options).await {
            Ok(photo) => photo,
            Err(e) => return self.fail(e),
        };
        if let Err(e) = photo.validate() {
            return self.fail(e);
        }

        let record = CaptureRecord::from_photo(&photo, &ratio);
        log::info!("Captured photo URI: {}", record.file_reference);
        if let Some(ref exif) = record.exif {
            log::info!(
                "EXIF metadata: {}",
                serde_json::to_string(exif).unwrap_or_else(|_| format!("{:?}", exif))
            );
        }
        log::info!("Dimensions: {} x {}", record.width, record.height);
        log::debug!("Capture record: {}", record.to_json());

        match self.media_store.save_to_library(photo.file_reference).await {
            Ok(asset) => self.succeed(record, asset),
            Err(e) => self.fail(e),
        }
    }

    // --- Internal helpers ---

    fn succeed(&self, record: CaptureRecord, asset: SavedAsset) -> CaptureOutcome {
        log::info!("Saved photo {} to library at {}", asset.id, asset.uri);
        {
            let mut inner = self.inner.lock();
            inner.diagnostics.captures_saved += 1;
            inner.diagnostics.last_record = Some(record.clone());
        }
        for delegate in self.delegates() {
            delegate.on_photo_saved(&record, &asset);
        }
        self.notify_alert(&Alert::photo_saved(&asset));
        self.settle();
        CaptureOutcome::Saved(asset)
    }

    /// Recoverable failure path shared by capture and persistence errors.
    fn fail(&self, err: CaptureError) -> CaptureOutcome {
        log::error!("Failed to capture or save photo: {}", err);
        {
            let mut inner = self.inner.lock();
            inner.diagnostics.captures_failed += 1;
            inner.diagnostics.last_error = Some(err.clone());
        }
        self.transition(
            |s| matches!(s, SessionState::Capturing),
            SessionState::CaptureFailed(err.clone()),
        );
        self.notify_alert(&Alert::capture_error());
        self.settle();
        CaptureOutcome::Failed(err)
    }

    /// End the in-flight capture and leave `Capturing`/`CaptureFailed`. Falls
    /// back to awaiting-readiness if the camera was unmounted mid-capture; a
    /// revoked permission is left alone.
    ///
    /// Only the pipeline that set `capture_in_flight` (or its drop guard) calls this.
    fn settle(&self) {
        let next = {
            let mut inner = self.inner.lock();
            inner.capture_in_flight = false;
            if !matches!(inner.state, SessionState::Capturing | SessionState::CaptureFailed(_)) {
                return;
            }
            inner.state = if inner.camera_ready {
                SessionState::Ready
            } else {
                SessionState::AwaitingReadiness
            };
            inner.state.clone()
        };
        self.notify_state(&next);
    }

    /// Apply a negotiated ratio. Moves awaiting-readiness to ready; after a
    /// remount during a capture only the ratio is recorded and `settle` does
    /// the transition.
    fn finish_negotiation(&self, ratio: AspectRatio) {
        let became_ready = {
            let mut inner = self.inner.lock();
            if !inner.camera_ready {
                return;
            }
            let became_ready = match inner.state {
                SessionState::AwaitingReadiness => true,
                // Remounted mid-capture; the capture may already have settled.
                SessionState::Ready => false,
                SessionState::Capturing | SessionState::CaptureFailed(_) if inner.capture_in_flight => false,
                _ => return,
            };
            inner.selected_ratio = ratio.clone();
            if became_ready {
                inner.state = SessionState::Ready;
            }
            became_ready
        };
        log::info!("Camera ready, using ratio {}", ratio);
        for delegate in self.delegates() {
            delegate.on_ratio_selected(&ratio);
        }
        if became_ready {
            self.notify_state(&SessionState::Ready);
        }
    }

    /// Move to `to` if the current state satisfies `from`.
    fn transition(&self, from: impl Fn(&SessionState) -> bool, to: SessionState) -> bool {
        {
            let mut inner = self.inner.lock();
            if !from(&inner.state) {
                return false;
            }
            inner.state = to.clone();
        }
        self.notify_state(&to);
        true
    }

    fn delegates(&self) -> Vec<Arc<dyn SessionDelegate>> {
        self.delegates.lock().clone()
    }

    fn notify_state(&self, state: &SessionState) {
        for delegate in self.delegates() {
            delegate.on_state_changed(state);
        }
    }

    fn notify_alert(&self, alert: &Alert) {
        for delegate in self.delegates() {
            delegate.on_alert(alert);
        }
    }
}

enum InFlightKind {
    Negotiation,
    Capture,
}

/// Resolves an in-flight operation if its future is dropped before completion,
/// so the controller is never left in `AwaitingReadiness` with a warm camera
/// or stuck in `Capturing`.
struct InFlight<'a, C: CameraDevice, M: MediaStore> {
    controller: &'a CaptureSessionController<C, M>,
    kind: InFlightKind,
    armed: bool,
}

impl<'a, C: CameraDevice, M: MediaStore> InFlight<'a, C, M> {
    fn new(controller: &'a CaptureSessionController<C, M>, kind: InFlightKind) -> Self {
        Self {
            controller,
            kind,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<C: CameraDevice, M: MediaStore> Drop for InFlight<'_, C, M> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.kind {
            InFlightKind::Negotiation => {
                log::warn!("Ratio negotiation abandoned, keeping current ratio");
                let current = self.controller.selected_ratio();
                self.controller.finish_negotiation(current);
            }
            InFlightKind::Capture => {
                log::warn!("Capture abandoned before completion");
                self.controller.settle();
            }
        }
    }
}
