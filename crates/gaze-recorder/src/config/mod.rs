mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod guidance_config;
mod window_config;

pub(crate) use {
    capture_config::CaptureConfig, config::Config, guidance_config::GuidanceConfig,
    window_config::WindowConfig,
};

#[cfg(test)]
pub(crate) use {
    capture_config::{StreamConfig, StreamKindConfig},
    guidance_config::{AxisConfig, ChoreographyConfig, SegmentConfig, parse_hex_color},
};

pub(crate) const DEFAULT_VENDOR: &str = "Beymans";
pub(crate) const DEFAULT_APP_NAME: &str = "RealSenseRecorder";
pub(crate) const DEFAULT_WINDOW_WIDTH: usize = 1280;
pub(crate) const DEFAULT_WINDOW_HEIGHT: usize = 720;
pub(crate) const DEFAULT_TARGET_FPS: usize = 60;
pub(crate) const DEFAULT_MARKER_RADIUS: u32 = 12;
pub(crate) const MAX_MARKER_RADIUS: u32 = 1024;
pub(crate) const DEFAULT_MARKER_COLOR: &str = "#00ff00";
