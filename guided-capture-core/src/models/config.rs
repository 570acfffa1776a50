use super::photo::CaptureOptions;
use super::ratio::AspectRatio;

/// Configuration for a capture session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfiguration {
    /// Preferred aspect ratio; also the startup value kept when negotiation
    /// finds nothing better (default: 4:3).
    pub desired_ratio: AspectRatio,

    /// Zoom factor. Only the neutral value 0.0 is supported.
    pub zoom: f32,

    /// Options for every still capture, including which camera to shoot with.
    pub capture_options: CaptureOptions,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.desired_ratio.as_str().trim().is_empty() {
            return Err("desired ratio must not be empty".into());
        }
        if self.zoom != 0.0 {
            return Err(format!("unsupported zoom: {}", self.zoom));
        }
        let quality = self.capture_options.quality;
        if !(0.0..=1.0).contains(&quality) {
            return Err(format!("capture quality out of range: {}", quality));
        }
        Ok(())
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            desired_ratio: AspectRatio::default(),
            zoom: 0.0,
            capture_options: CaptureOptions::default(),
        }
    }
}
