//! Stage configuration
//!
//! Display size, frame rate and the default spawn point. Configuration can be
//! built in code or read from a RON document:
//!
//! ```
//! use stagecraft_core::StageConfig;
//!
//! let ron = "(width: 800, height: 600, frames_per_second: 30)";
//! let config = StageConfig::from_ron_str(ron).unwrap();
//! assert_eq!(config.frames_per_second(), 30);
//! assert_eq!(config.origin(), (400.0, 300.0));
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a [`Stage`](crate::Stage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
    /// Frame rate used to convert second-based delays and tween durations
    ///
    /// Clamped to at least 1 by [`StageConfig::frames_per_second`].
    pub frames_per_second: u32,
    /// Position given to new actors that do not pick one
    ///
    /// `None` means the center of the display.
    pub origin: Option<(f64, f64)>,
}

impl StageConfig {
    /// Create a configuration for a display of the given size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the frame rate
    pub fn with_frames_per_second(mut self, fps: u32) -> Self {
        self.frames_per_second = fps;
        self
    }

    /// Set an explicit default actor position
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Some((x, y));
        self
    }

    /// Effective frame rate (never zero)
    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second.max(1)
    }

    /// Position given to new actors
    pub fn origin(&self) -> (f64, f64) {
        self.origin
            .unwrap_or((self.width as f64 / 2.0, self.height as f64 / 2.0))
    }

    /// Parse a configuration from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }
}

impl Default for StageConfig {
    /// A 640x480 display at 60 frames per second
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frames_per_second: 60,
            origin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_default_origin_is_display_center() {
        let config = StageConfig::default();
        assert_eq!(config.origin(), (320.0, 240.0));
    }

    #[test]
    fn test_explicit_origin() {
        let config = StageConfig::with_size(100, 100).with_origin(0.0, 0.0);
        assert_eq!(config.origin(), (0.0, 0.0));
    }

    #[test]
    fn test_zero_frame_rate_is_clamped() {
        let config = StageConfig::default().with_frames_per_second(0);
        assert_eq!(config.frames_per_second(), 1);
    }

    #[test]
    fn test_from_ron_partial() {
        let config = StageConfig::from_ron_str("(frames_per_second: 25)").unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.frames_per_second(), 25);

        let config = StageConfig::from_ron_str("(origin: Some((1.0, 2.0)))").unwrap();
        assert_eq!(config.origin(), (1.0, 2.0));
    }

    #[test]
    fn test_from_ron_invalid() {
        let err = StageConfig::from_ron_str("(width: \"wide\")").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = StageConfig::load("/nonexistent/stage.ron").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
