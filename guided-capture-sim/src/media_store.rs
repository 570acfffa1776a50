//! Directory-backed media library.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use guided_capture_core::models::error::CaptureError;
use guided_capture_core::models::permission::PermissionResponse;
use guided_capture_core::models::photo::{FileReference, SavedAsset};
use guided_capture_core::traits::media_store::MediaStore;
use guided_capture_core::traits::permission_provider::PermissionProvider;

use crate::permissions::ScriptedPrompt;

/// Media library that moves each saved photo into `library_dir`, naming it
/// after the first 16 hex digits of its SHA-256 so identical frames collapse
/// into one file. The camera's scratch frame is removed once the copy is written.
pub struct DirectoryMediaStore {
    library_dir: PathBuf,
    prompt: ScriptedPrompt,
    failures: Mutex<VecDeque<CaptureError>>,
    assets: Mutex<Vec<SavedAsset>>,
}

impl DirectoryMediaStore {
    pub fn new(library_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: library_dir.into(),
            prompt: ScriptedPrompt::always_grant(),
            failures: Mutex::new(VecDeque::new()),
            assets: Mutex::new(Vec::new()),
        }
    }

    pub fn with_prompt(mut self, prompt: ScriptedPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// Make the next save fail with `error`.
    pub fn fail_next(&self, error: CaptureError) {
        self.failures.lock().push_back(error);
    }

    /// Assets saved so far, oldest first.
    pub fn assets(&self) -> Vec<SavedAsset> {
        self.assets.lock().clone()
    }

    pub fn prompt(&self) -> &ScriptedPrompt {
        &self.prompt
    }

    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    fn copy_into_library(&self, file: &FileReference) -> Result<SavedAsset, CaptureError> {
        let source = local_path(file);
        let data = fs::read(&source).map_err(|e| {
            CaptureError::PersistenceFailed(format!("failed to read {}: {}", source.display(), e))
        })?;

        let checksum = hex_encode(&Sha256::digest(&data));
        fs::create_dir_all(&self.library_dir)
            .map_err(|e| CaptureError::PersistenceFailed(format!("failed to create library: {}", e)))?;

        let extension = source.extension().and_then(|e| e.to_str()).unwrap_or("jpg");
        let target = self.library_dir.join(format!("{}.{}", &checksum[..16], extension));
        fs::write(&target, &data)
            .map_err(|e| CaptureError::PersistenceFailed(format!("failed to write {}: {}", target.display(), e)))?;

        log::debug!("Copied {} ({} bytes, sha256 {})", source.display(), data.len(), checksum);
        if let Err(e) = fs::remove_file(&source) {
            log::warn!("Failed to remove scratch frame {}: {}", source.display(), e);
        }
        Ok(SavedAsset {
            id: uuid::Uuid::new_v4().to_string(),
            uri: format!("file://{}", target.display()),
        })
    }
}

/// Strip the `file://` scheme if present.
fn local_path(file: &FileReference) -> PathBuf {
    let uri = file.as_str();
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl PermissionProvider for DirectoryMediaStore {
    async fn request_permission(&self) -> PermissionResponse {
        self.prompt.request_permission().await
    }
}

#[async_trait]
impl MediaStore for DirectoryMediaStore {
    async fn save_to_library(&self, file: FileReference) -> Result<SavedAsset, CaptureError> {
        tokio::task::yield_now().await;

        let failure = self.failures.lock().pop_front();
        if let Some(err) = failure {
            log::warn!("Simulated save of {} failing: {}", file, err);
            return Err(err);
        }

        let asset = self.copy_into_library(&file)?;
        self.assets.lock().push(asset.clone());
        Ok(asset)
    }
}
