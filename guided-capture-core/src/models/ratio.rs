use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque aspect-ratio identifier as reported by the camera (e.g. `"4:3"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AspectRatio(String);

impl AspectRatio {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pick the working ratio from what the hardware supports.
    ///
    /// Prefers `desired`, then the first supported entry in hardware order,
    /// and keeps `current` when nothing is supported.
    pub fn negotiate(desired: &AspectRatio, supported: &[AspectRatio], current: &AspectRatio) -> AspectRatio {
        if supported.contains(desired) {
            return desired.clone();
        }
        supported.first().unwrap_or(current).clone()
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::new("4:3")
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AspectRatio {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
