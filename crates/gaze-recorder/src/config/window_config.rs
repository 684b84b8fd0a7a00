use crate::config::{DEFAULT_TARGET_FPS, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

use serde::{Deserialize, Serialize};

/// Guidance window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Borderless, always-on-top window covering `width` x `height`.
    pub fullscreen: bool,
    /// Window width in pixels.
    pub width: usize,
    /// Window height in pixels.
    pub height: usize,
    /// Render loop rate limit.
    pub target_fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            fullscreen: false,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}
