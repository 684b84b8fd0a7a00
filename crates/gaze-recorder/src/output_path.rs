//! Capture file naming.
//!
//! Recordings land in `<data-dir>/<vendor>/<app>/<timestamp>.<ext>` where
//! the timestamp is local time formatted as `YYYY-MM-DD-HH-MM-SS`.

use crate::{AppError, AppResult, config::CaptureConfig};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use directories::BaseDirs;
use error_location::ErrorLocation;
use tracing::{debug, instrument};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Directory recordings are written to, under `data_dir`.
pub(crate) fn recordings_dir(data_dir: &Path, config: &CaptureConfig) -> PathBuf {
    data_dir.join(&config.vendor).join(&config.app_name)
}

/// File name for a recording started at `timestamp`.
pub(crate) fn capture_file_name(timestamp: NaiveDateTime, extension: &str) -> String {
    format!("{}.{}", timestamp.format(TIMESTAMP_FORMAT), extension)
}

/// Build the path for a new recording and create its directory.
#[track_caller]
#[instrument(skip(config))]
pub(crate) fn prepare_capture_path(config: &CaptureConfig, extension: &str) -> AppResult<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| AppError::OutputError {
        reason: "Can't retrieve the user data directory".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let dir = recordings_dir(base_dirs.data_dir(), config);
    create_recordings_dir(&dir)?;

    Ok(dir.join(capture_file_name(Local::now().naive_local(), extension)))
}

/// Create `dir` and its parents if missing.
#[track_caller]
pub(crate) fn create_recordings_dir(dir: &Path) -> AppResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| AppError::OutputError {
            reason: format!("Failed to create {}: {}", dir.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        debug!(dir = ?dir, "Created recordings directory");
    }
    Ok(())
}
