use crate::capture::SdkStatus;

use std::{fmt, path::Path};

/// Kind of stream requested from a capture backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// RGB color stream.
    Color,
    /// Depth stream.
    Depth,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Color => write!(f, "color"),
            StreamKind::Depth => write!(f, "depth"),
        }
    }
}

/// A single stream the backend should record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    /// Stream kind.
    pub kind: StreamKind,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
}

impl StreamSpec {
    /// Color and depth at 640x480, 30 fps.
    pub fn defaults() -> Vec<StreamSpec> {
        vec![
            StreamSpec {
                kind: StreamKind::Color,
                width: 640,
                height: 480,
                fps: 30,
            },
            StreamSpec {
                kind: StreamKind::Depth,
                width: 640,
                height: 480,
                fps: 30,
            },
        ]
    }
}

impl fmt::Display for StreamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}x{}@{}", self.kind, self.width, self.height, self.fps)
    }
}

/// A depth-camera capture backend that records to a file as a side effect
/// of being pumped.
///
/// Frames must be acquired and released continuously for anything to be
/// written. `acquire_frame` blocks until the next frame is available.
///
/// Implementations are moved onto the recording worker thread while
/// recording, so they must be `Send`. They are never accessed from two
/// threads at once.
pub trait FrameSource: Send {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// File extension (without dot) of the capture files this backend writes.
    fn file_extension(&self) -> &str;

    /// Set the recording file and the streams to capture.
    fn configure(&mut self, output_path: &Path, streams: &[StreamSpec]) -> SdkStatus;

    /// Start the device and the recorder.
    fn initialize(&mut self) -> SdkStatus;

    /// Block until the next frame is available and lock it.
    fn acquire_frame(&mut self) -> SdkStatus;

    /// Unlock the frame taken by the last successful `acquire_frame`.
    fn release_frame(&mut self);

    /// Stop the device and finalize the recording file.
    fn release(&mut self);
}
