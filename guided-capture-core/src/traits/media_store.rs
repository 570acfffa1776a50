use async_trait::async_trait;

use crate::models::error::CaptureError;
use crate::models::photo::{FileReference, SavedAsset};
use crate::traits::permission_provider::PermissionProvider;

/// Interface for the device media library (gallery).
#[async_trait]
pub trait MediaStore: PermissionProvider {
    /// Persist the referenced image into the library.
    async fn save_to_library(&self, file: FileReference) -> Result<SavedAsset, CaptureError>;
}
