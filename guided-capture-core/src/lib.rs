//! # guided-capture-core
//!
//! Platform-agnostic core of a single-screen guided photo capture tool.
//!
//! Sequences permission acquisition, camera readiness, aspect-ratio
//! negotiation, still capture and saving to the media library, and computes
//! the alignment guide drawn over the viewfinder. Platform backends implement
//! `CameraDevice` and `MediaStore` and plug into the generic
//! `CaptureSessionController`.
//!
//! ## Architecture
//!
//! ```text
//! guided-capture-core (this crate)
//! ├── traits/   ← PermissionProvider, CameraDevice, MediaStore, SessionDelegate
//! ├── models/   ← CaptureError, SessionState, PermissionState, AspectRatio, CapturedPhoto, etc.
//! ├── session/  ← PermissionGate, CaptureSessionController
//! └── overlay/  ← OverlayLayout, render_overlay (pure guide geometry)
//! ```

pub mod models;
pub mod overlay;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::alert::{Alert, AlertKind, CAMERA_PERMISSION_ACTION, CAMERA_PERMISSION_TEXT};
pub use models::config::SessionConfiguration;
pub use models::error::CaptureError;
pub use models::outcome::{CaptureOutcome, RejectReason, SessionDiagnostics};
pub use models::permission::{Capability, PermissionResponse, PermissionState};
pub use models::photo::{CameraFacing, CaptureOptions, CaptureRecord, CapturedPhoto, ExifMap, FileReference, SavedAsset};
pub use models::ratio::AspectRatio;
pub use models::state::SessionState;
pub use overlay::{render_overlay, GuideOverlay, OverlayLayout, Viewport};
pub use session::controller::CaptureSessionController;
pub use session::permission_gate::PermissionGate;
pub use traits::camera::CameraDevice;
pub use traits::media_store::MediaStore;
pub use traits::permission_provider::PermissionProvider;
pub use traits::session_delegate::SessionDelegate;
