use crate::{
    CaptureError, CoreResult,
    capture::{FrameSource, SdkStatus, StreamSpec},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// An initialized capture backend recording into `output_path`.
///
/// The backend is released exactly once: by [`CaptureSession::close`] or,
/// on any other path, when the session is dropped.
pub struct CaptureSession<S: FrameSource> {
    source: S,
    output_path: PathBuf,
    released: bool,
}

impl<S: FrameSource> CaptureSession<S> {
    /// Configure and initialize `source` to record `streams` into `output_path`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NoStreams`] if `streams` is empty and
    /// [`CaptureError::Sdk`] if the backend rejects configuration or
    /// initialization. The backend is released before returning an error.
    #[track_caller]
    #[instrument(skip(source, streams), fields(backend = source.name()))]
    pub fn open(source: S, output_path: &Path, streams: &[StreamSpec]) -> CoreResult<Self> {
        if streams.is_empty() {
            return Err(CaptureError::NoStreams {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut session = Self {
            source,
            output_path: output_path.to_path_buf(),
            released: false,
        };

        session
            .source
            .configure(output_path, streams)
            .check("configuring the capture")?;

        for stream in streams {
            debug!(stream = %stream, "Stream enabled");
        }

        session
            .source
            .initialize()
            .check("initializing the capture")?;

        info!(
            output_path = ?session.output_path,
            stream_count = streams.len(),
            "Capture session opened"
        );

        Ok(session)
    }

    /// Block until the next frame is available.
    pub fn acquire_frame(&mut self) -> SdkStatus {
        self.source.acquire_frame()
    }

    /// Release the frame taken by the last successful acquisition.
    pub fn release_frame(&mut self) {
        self.source.release_frame();
    }

    /// File the backend is recording into.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// The underlying backend.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Release the backend and finalize the recording.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.source.release();
            info!(output_path = ?self.output_path, "Capture session released");
        }
    }
}

impl<S: FrameSource> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}
