//! # guided-capture-sim
//!
//! Simulated backends for guided-capture.
//!
//! Provides:
//! - `SimulatedCamera` — still camera writing JPEG-framed files to a scratch directory
//! - `DirectoryMediaStore` — media library backed by a plain directory
//! - `ScriptedPrompt` — permission dialog answering from a script
//!
//! ## Usage
//! ```ignore
//! use guided_capture_sim::simulated_session;
//!
//! let session = simulated_session("/tmp/guided-capture")?;
//! session.start().await;
//! session.on_camera_ready().await;
//! let outcome = session.capture().await;
//! ```

pub mod camera;
pub mod media_store;
pub mod permissions;

use std::path::Path;

use guided_capture_core::{CaptureError, CaptureSessionController, SessionConfiguration};

pub use camera::SimulatedCamera;
pub use media_store::DirectoryMediaStore;
pub use permissions::ScriptedPrompt;

pub type SimulatedSession = CaptureSessionController<SimulatedCamera, DirectoryMediaStore>;

/// A session with default backends rooted at `root`: frames under `root/cache`,
/// the library under `root/library`.
pub fn simulated_session(root: impl AsRef<Path>) -> Result<SimulatedSession, CaptureError> {
    let root = root.as_ref();
    CaptureSessionController::new(
        SimulatedCamera::new(root.join("cache")),
        DirectoryMediaStore::new(root.join("library")),
        SessionConfiguration::default(),
    )
}
