use async_trait::async_trait;

use crate::models::permission::PermissionResponse;

/// A host capability that can prompt the user for authorization.
///
/// Resolving to a denial is a normal answer, not an error: implementations
/// should map platform failures to `PermissionResponse::denied()`.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Ask the platform for authorization, showing a native prompt if needed.
    async fn request_permission(&self) -> PermissionResponse;
}
