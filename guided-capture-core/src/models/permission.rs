use std::fmt;

use serde::{Deserialize, Serialize};

/// A device capability guarded by a platform permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Camera,
    MediaStore,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => f.write_str("camera"),
            Self::MediaStore => f.write_str("media-store"),
        }
    }
}

/// Authorization state of a single capability.
///
/// ```text
/// unrequested → requesting → granted
///                    ↓
///                  denied → requesting (only if the platform can ask again)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Unrequested,
    Requesting,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// What the host platform answered to a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionResponse {
    pub granted: bool,
    /// False when the platform will not show the prompt again
    /// (e.g. "don't ask again" or an enterprise policy).
    pub can_ask_again: bool,
}

impl PermissionResponse {
    pub fn granted() -> Self {
        Self {
            granted: true,
            can_ask_again: true,
        }
    }

    pub fn denied() -> Self {
        Self {
            granted: false,
            can_ask_again: true,
        }
    }

    pub fn denied_permanently() -> Self {
        Self {
            granted: false,
            can_ask_again: false,
        }
    }

    pub fn state(&self) -> PermissionState {
        if self.granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }
}
