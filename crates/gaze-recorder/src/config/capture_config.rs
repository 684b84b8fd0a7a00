use crate::config::{DEFAULT_APP_NAME, DEFAULT_VENDOR};

use gaze_recorder_core::{StreamKind, StreamSpec};
use serde::{Deserialize, Serialize};

/// Capture backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Vendor directory under the user data directory.
    pub vendor: String,
    /// Application directory under the vendor directory.
    pub app_name: String,
    /// Make the synthetic camera lose the device after this many frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_after_frames: Option<u64>,
    /// Streams to record.
    pub streams: Vec<StreamConfig>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            vendor: DEFAULT_VENDOR.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            fail_after_frames: None,
            streams: StreamSpec::defaults().iter().map(StreamConfig::from).collect(),
        }
    }
}

impl CaptureConfig {
    /// Streams in the form the capture backend expects.
    pub fn stream_specs(&self) -> Vec<StreamSpec> {
        self.streams.iter().map(StreamSpec::from).collect()
    }
}

/// One recorded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Stream kind.
    pub kind: StreamKindConfig,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
}

/// Stream kind as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKindConfig {
    /// RGB color.
    Color,
    /// Depth.
    Depth,
}

impl From<&StreamConfig> for StreamSpec {
    fn from(config: &StreamConfig) -> Self {
        StreamSpec {
            kind: match config.kind {
                StreamKindConfig::Color => StreamKind::Color,
                StreamKindConfig::Depth => StreamKind::Depth,
            },
            width: config.width,
            height: config.height,
            fps: config.fps,
        }
    }
}

impl From<&StreamSpec> for StreamConfig {
    fn from(spec: &StreamSpec) -> Self {
        StreamConfig {
            kind: match spec.kind {
                StreamKind::Color => StreamKindConfig::Color,
                StreamKind::Depth => StreamKindConfig::Depth,
            },
            width: spec.width,
            height: spec.height,
            fps: spec.fps,
        }
    }
}
