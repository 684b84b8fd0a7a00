//! Software capture backend.
//!
//! Stands in for a vendor depth-camera SDK on machines without one. It
//! paces acquisitions at the fastest requested stream rate and writes a
//! line-based capture index:
//!
//! ```text
//! synthetic-capture 1
//! stream color 640x480@30
//! stream depth 640x480@30
//! frame 0 33333
//! frame 1 66666
//! ```
//!
//! Each frame line holds the frame index and the microseconds elapsed
//! since initialization.

use crate::{
    CoreResult,
    capture::{FrameSource, SdkStatus, StreamSpec},
};

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tracing::{debug, info, instrument, warn};

/// The backend was used before `configure`/`initialize`.
pub const STATUS_NOT_INITIALIZED: i32 = -1;
/// A stream spec had a zero dimension or rate.
pub const STATUS_INVALID_STREAM: i32 = -2;
/// The capture file could not be written.
pub const STATUS_IO_FAILURE: i32 = -3;
/// A frame was acquired while the previous one was still held.
pub const STATUS_FRAME_HELD: i32 = -4;
/// The simulated device stopped delivering frames.
pub const STATUS_DEVICE_LOST: i32 = -301;
/// Acquisition fell behind by at least one frame interval.
pub const STATUS_FRAME_DROPPED: i32 = 1;

const FORMAT_HEADER: &str = "synthetic-capture 1";

/// A software depth camera that records a capture index file.
#[derive(Debug, Default)]
pub struct SyntheticCamera {
    streams: Vec<StreamSpec>,
    output_path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
    started_at: Option<Instant>,
    next_frame_at: Option<Instant>,
    frame_interval: Duration,
    frame_index: u64,
    holding_frame: bool,
    fail_after: Option<u64>,
}

impl SyntheticCamera {
    /// Create an unconfigured camera.
    #[instrument]
    pub fn create() -> CoreResult<Self> {
        debug!("Synthetic camera created");
        Ok(Self::default())
    }

    /// Make acquisition fail with [`STATUS_DEVICE_LOST`] once `frames`
    /// frames have been delivered.
    pub fn fail_after(mut self, frames: u64) -> Self {
        self.fail_after = Some(frames);
        self
    }

    /// Number of frames delivered so far.
    pub fn frames_delivered(&self) -> u64 {
        self.frame_index
    }

    fn write_line(&mut self, line: &str) -> SdkStatus {
        let Some(writer) = self.writer.as_mut() else {
            return SdkStatus::from_code(STATUS_NOT_INITIALIZED, "capture not initialized");
        };

        match writeln!(writer, "{line}") {
            Ok(()) => SdkStatus::Ok,
            Err(e) => SdkStatus::from_code(
                STATUS_IO_FAILURE,
                format!("failed to write capture file: {e}"),
            ),
        }
    }
}

impl FrameSource for SyntheticCamera {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn file_extension(&self) -> &str {
        "synth"
    }

    fn configure(&mut self, output_path: &Path, streams: &[StreamSpec]) -> SdkStatus {
        if let Some(bad) = streams
            .iter()
            .find(|s| s.width == 0 || s.height == 0 || s.fps == 0)
        {
            return SdkStatus::from_code(
                STATUS_INVALID_STREAM,
                format!("unsupported stream {bad}"),
            );
        }

        let fastest = streams.iter().map(|s| s.fps).max().unwrap_or(1);
        self.frame_interval = Duration::from_secs(1) / fastest;
        self.streams = streams.to_vec();
        self.output_path = Some(output_path.to_path_buf());

        SdkStatus::Ok
    }

    fn initialize(&mut self) -> SdkStatus {
        let Some(path) = self.output_path.clone() else {
            return SdkStatus::from_code(STATUS_NOT_INITIALIZED, "capture not configured");
        };

        let file = match File::create(&path) {
            Ok(f) => f,
            Err(e) => {
                return SdkStatus::from_code(
                    STATUS_IO_FAILURE,
                    format!("failed to create {}: {e}", path.display()),
                );
            }
        };
        self.writer = Some(BufWriter::new(file));

        let status = self.write_line(FORMAT_HEADER);
        if status.is_error() {
            return status;
        }
        for stream in self.streams.clone() {
            let status = self.write_line(&format!("stream {stream}"));
            if status.is_error() {
                return status;
            }
        }

        let now = Instant::now();
        self.started_at = Some(now);
        self.next_frame_at = Some(now + self.frame_interval);

        info!(
            output_path = ?path,
            frame_interval_us = self.frame_interval.as_micros(),
            "Synthetic camera initialized"
        );

        SdkStatus::Ok
    }

    fn acquire_frame(&mut self) -> SdkStatus {
        let (Some(started_at), Some(next_frame_at)) = (self.started_at, self.next_frame_at) else {
            return SdkStatus::from_code(STATUS_NOT_INITIALIZED, "capture not initialized");
        };

        if self.holding_frame {
            return SdkStatus::from_code(STATUS_FRAME_HELD, "previous frame not released");
        }

        if self.fail_after.is_some_and(|n| self.frame_index >= n) {
            return SdkStatus::from_code(STATUS_DEVICE_LOST, "device lost");
        }

        let now = Instant::now();
        let mut dropped = false;
        if next_frame_at > now {
            std::thread::sleep(next_frame_at - now);
            self.next_frame_at = Some(next_frame_at + self.frame_interval);
        } else {
            dropped = now - next_frame_at >= self.frame_interval;
            // Resync instead of bursting to catch up.
            self.next_frame_at = Some(now + self.frame_interval);
        }

        let micros = started_at.elapsed().as_micros();
        let status = self.write_line(&format!("frame {} {micros}", self.frame_index));
        if status.is_error() {
            return status;
        }

        self.frame_index += 1;
        self.holding_frame = true;

        if dropped {
            SdkStatus::from_code(STATUS_FRAME_DROPPED, "acquisition fell behind the stream rate")
        } else {
            SdkStatus::Ok
        }
    }

    fn release_frame(&mut self) {
        self.holding_frame = false;
    }

    fn release(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                warn!(error = %e, "Failed to flush capture file");
            }
        }
        self.started_at = None;
        self.next_frame_at = None;
        self.holding_frame = false;

        debug!(frames = self.frame_index, "Synthetic camera released");
    }
}
