//! Layout editor and screen geometry configuration types.

use serde::{Deserialize, Serialize};

/// Bounds and pacing for both layout editors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest scale a pinch can reach (valid range: 0.1-1.0).
    pub min_scale: f64,
    /// Largest scale a pinch can reach (valid range: 1.0-10.0).
    pub max_scale: f64,
    /// Remote editor polling interval in milliseconds (valid range: 100-60000).
    pub poll_interval_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 3.0,
            poll_interval_ms: 2000,
        }
    }
}

/// Screen size assumed until the rendering surface is first measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}
