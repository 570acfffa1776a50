//! Simulated still camera.
//!
//! Writes a small JPEG-framed payload per capture into a scratch directory and
//! returns a `file://` reference to it, so the media store has real bytes to copy.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use guided_capture_core::models::error::CaptureError;
use guided_capture_core::models::permission::PermissionResponse;
use guided_capture_core::models::photo::{CameraFacing, CaptureOptions, CapturedPhoto, ExifMap, FileReference};
use guided_capture_core::models::ratio::AspectRatio;
use guided_capture_core::traits::camera::CameraDevice;
use guided_capture_core::traits::permission_provider::PermissionProvider;

use crate::permissions::ScriptedPrompt;

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

pub struct SimulatedCamera {
    frame_dir: PathBuf,
    prompt: ScriptedPrompt,
    ratios: Result<Vec<AspectRatio>, String>,
    resolution: (u32, u32),
    front_resolution: (u32, u32),
    capture_delay: Option<Duration>,
    failures: Mutex<VecDeque<CaptureError>>,
    captures: AtomicUsize,
    last_options: Mutex<Option<CaptureOptions>>,
}

impl SimulatedCamera {
    /// A camera that grants access, supports 4:3, 16:9 and 1:1, and shoots
    /// 4032x3024 on the back lens and 1920x1440 on the front one.
    pub fn new(frame_dir: impl Into<PathBuf>) -> Self {
        Self {
            frame_dir: frame_dir.into(),
            prompt: ScriptedPrompt::always_grant(),
            ratios: Ok(vec!["4:3".into(), "16:9".into(), "1:1".into()]),
            resolution: (4032, 3024),
            front_resolution: (1920, 1440),
            capture_delay: None,
            failures: Mutex::new(VecDeque::new()),
            captures: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        }
    }

    pub fn with_prompt(mut self, prompt: ScriptedPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_supported_ratios(mut self, ratios: &[&str]) -> Self {
        self.ratios = Ok(ratios.iter().map(|id| AspectRatio::from(*id)).collect());
        self
    }

    /// Make ratio discovery fail with `message`.
    pub fn with_ratio_error(mut self, message: &str) -> Self {
        self.ratios = Err(message.to_string());
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = (width, height);
        self
    }

    pub fn with_front_resolution(mut self, width: u32, height: u32) -> Self {
        self.front_resolution = (width, height);
        self
    }

    /// Keep each capture pending for `delay` before the shutter fires.
    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = Some(delay);
        self
    }

    /// Make the next capture fail with `error`. Failures queue up in order.
    pub fn fail_next(&self, error: CaptureError) {
        self.failures.lock().push_back(error);
    }

    /// Number of times the shutter was triggered, including failed attempts.
    pub fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<CaptureOptions> {
        *self.last_options.lock()
    }

    pub fn prompt(&self) -> &ScriptedPrompt {
        &self.prompt
    }

    pub fn frame_dir(&self) -> &Path {
        &self.frame_dir
    }

    fn write_frame(&self, index: usize, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        fs::create_dir_all(&self.frame_dir)
            .map_err(|e| CaptureError::CaptureFailed(format!("failed to create frame directory: {}", e)))?;

        let id = uuid::Uuid::new_v4();
        let path = self.frame_dir.join(format!("photo_{}.jpg", id));
        let (width, height) = match options.facing {
            CameraFacing::Back => self.resolution,
            CameraFacing::Front => self.front_resolution,
        };

        let mut frame = Vec::with_capacity(64);
        frame.extend_from_slice(&JPEG_SOI);
        frame.extend_from_slice(id.as_bytes());
        frame.extend_from_slice(&(index as u32).to_le_bytes());
        frame.extend_from_slice(&width.to_le_bytes());
        frame.extend_from_slice(&height.to_le_bytes());
        frame.extend_from_slice(&JPEG_EOI);
        fs::write(&path, &frame)
            .map_err(|e| CaptureError::CaptureFailed(format!("failed to write frame: {}", e)))?;

        let exif = options.exif.then(|| {
            let mut exif = ExifMap::new();
            exif.insert("Make".into(), serde_json::json!("guided-capture-sim"));
            exif.insert("ImageUniqueID".into(), serde_json::json!(id.to_string()));
            exif.insert("PixelXDimension".into(), serde_json::json!(width));
            exif.insert("PixelYDimension".into(), serde_json::json!(height));
            exif.insert("LensFacing".into(), serde_json::json!(options.facing.as_str()));
            if !options.skip_processing {
                exif.insert("Software".into(), serde_json::json!("processed"));
            }
            exif
        });

        Ok(CapturedPhoto {
            file_reference: FileReference::new(format!("file://{}", path.display())),
            width,
            height,
            exif,
        })
    }
}

#[async_trait]
impl PermissionProvider for SimulatedCamera {
    async fn request_permission(&self) -> PermissionResponse {
        self.prompt.request_permission().await
    }
}

#[async_trait]
impl CameraDevice for SimulatedCamera {
    async fn supported_ratios(&self) -> Result<Vec<AspectRatio>, CaptureError> {
        tokio::task::yield_now().await;
        self.ratios.clone().map_err(CaptureError::RatioDiscovery)
    }

    async fn capture(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        let index = self.captures.fetch_add(1, Ordering::SeqCst);
        *self.last_options.lock() = Some(*options);

        match self.capture_delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        let failure = self.failures.lock().pop_front();
        if let Some(err) = failure {
            log::warn!("Simulated capture {} failing: {}", index, err);
            return Err(err);
        }
        self.write_frame(index, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("guided_capture_sim_{}_{}", name, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn capture_writes_jpeg_framed_file() {
        let dir = temp_dir("camera");
        let camera = SimulatedCamera::new(&dir).with_resolution(1600, 1200);

        let photo = camera.capture(&CaptureOptions::default()).await.unwrap();
        assert_eq!((photo.width, photo.height), (1600, 1200));

        let path = photo.file_reference.as_str().strip_prefix("file://").unwrap();
        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[..2], &JPEG_SOI);
        assert_eq!(&bytes[bytes.len() - 2..], &JPEG_EOI);

        let exif = photo.exif.unwrap();
        assert_eq!(exif["PixelXDimension"], 1600);
        assert!(!exif.contains_key("Software"));

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn exif_is_omitted_when_not_requested() {
        let dir = temp_dir("no_exif");
        let camera = SimulatedCamera::new(&dir);
        let options = CaptureOptions {
            exif: false,
            ..Default::default()
        };

        let photo = camera.capture(&options).await.unwrap();
        assert!(photo.exif.is_none());
        assert_eq!(camera.last_options(), Some(options));

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn front_facing_uses_front_lens() {
        let dir = temp_dir("front");
        let camera = SimulatedCamera::new(&dir).with_front_resolution(1280, 960);
        let options = CaptureOptions {
            facing: CameraFacing::Front,
            ..Default::default()
        };

        let photo = camera.capture(&options).await.unwrap();
        assert_eq!((photo.width, photo.height), (1280, 960));
        assert_eq!(photo.exif.unwrap()["LensFacing"], "front");

        let back = camera.capture(&CaptureOptions::default()).await.unwrap();
        assert_eq!((back.width, back.height), (4032, 3024));
        assert_eq!(back.exif.unwrap()["LensFacing"], "back");

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn scripted_failure_applies_once() {
        let dir = temp_dir("failure");
        let camera = SimulatedCamera::new(&dir);
        camera.fail_next(CaptureError::CaptureFailed("hardware busy".into()));

        assert!(camera.capture(&CaptureOptions::default()).await.is_err());
        assert!(camera.capture(&CaptureOptions::default()).await.is_ok());
        assert_eq!(camera.capture_count(), 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn ratio_error_maps_to_discovery_failure() {
        let camera = SimulatedCamera::new(temp_dir("ratios")).with_ratio_error("not bound");
        assert_eq!(
            camera.supported_ratios().await,
            Err(CaptureError::RatioDiscovery("not bound".into()))
        );
    }
}
