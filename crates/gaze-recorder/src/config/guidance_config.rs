use crate::{
    AppError, AppResult,
    config::{DEFAULT_MARKER_COLOR, DEFAULT_MARKER_RADIUS, MAX_MARKER_RADIUS},
};

use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use gaze_recorder_core::{Axis, Choreography, GuidancePosition, Segment};
use serde::{Deserialize, Serialize};

/// Guidance marker and choreography configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// PNG to draw as the marker (None = a generated disc).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_path: Option<PathBuf>,
    /// Radius of the generated disc in pixels.
    pub marker_radius: u32,
    /// Color of the generated disc as `#rrggbb`.
    pub marker_color: String,
    /// Custom choreography (None = the built-in border walk).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choreography: Option<ChoreographyConfig>,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            marker_path: None,
            marker_radius: DEFAULT_MARKER_RADIUS,
            marker_color: DEFAULT_MARKER_COLOR.to_string(),
            choreography: None,
        }
    }
}

/// A user-defined choreography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoreographyConfig {
    /// Marker position before recording starts, `[x, y]`.
    pub initial: [f64; 2],
    /// Movement steps in time order.
    pub segments: Vec<SegmentConfig>,
}

/// One movement step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Axis being moved.
    pub axis: AxisConfig,
    /// Axis value at `start`.
    pub from: f64,
    /// Axis value at `end`.
    pub to: f64,
}

/// Axis as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisConfig {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl GuidanceConfig {
    /// Build the configured choreography, or the built-in one.
    #[track_caller]
    pub fn choreography(&self) -> AppResult<Choreography> {
        let Some(custom) = &self.choreography else {
            return Ok(Choreography::reference());
        };

        let segments = custom
            .segments
            .iter()
            .map(|s| {
                let axis = match s.axis {
                    AxisConfig::X => Axis::X,
                    AxisConfig::Y => Axis::Y,
                };
                Segment::new(s.start, s.end, axis, s.from, s.to)
            })
            .collect();

        let [x, y] = custom.initial;
        Choreography::new(GuidancePosition::new(x, y), segments).map_err(|e| {
            AppError::ConfigError {
                reason: format!("Invalid guidance choreography: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Radius of the generated disc, checked against `1..=MAX_MARKER_RADIUS`.
    #[track_caller]
    pub fn checked_marker_radius(&self) -> AppResult<u32> {
        if (1..=MAX_MARKER_RADIUS).contains(&self.marker_radius) {
            return Ok(self.marker_radius);
        }
        Err(AppError::ConfigError {
            reason: format!(
                "Invalid marker radius {}, expected 1 to {}",
                self.marker_radius, MAX_MARKER_RADIUS
            ),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Marker color as `0x00RRGGBB`.
    #[track_caller]
    pub fn marker_rgb(&self) -> AppResult<u32> {
        parse_hex_color(&self.marker_color).ok_or_else(|| AppError::ConfigError {
            reason: format!(
                "Invalid marker color {:?}, expected #rrggbb",
                self.marker_color
            ),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Parse `#rrggbb` (leading `#` optional) into `0x00RRGGBB`.
pub(crate) fn parse_hex_color(text: &str) -> Option<u32> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
