use crate::{
    CaptureError, CoreResult,
    capture::{CaptureSession, FrameSource, SdkStatus},
};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use error_location::ErrorLocation;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// What a recording worker did before it stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerReport {
    /// Frames acquired and released.
    pub frames: u64,
    /// Acquisitions that succeeded with a warning.
    pub warnings: u64,
    /// The error status that stopped the worker, if any.
    pub failure: Option<SdkStatus>,
}

type WorkerOutput<S> = (CaptureSession<S>, WorkerReport);

/// Background thread pumping frames out of a capture session.
///
/// The capture session moves onto the worker thread and comes back on
/// [`RecordingWorker::join`], so the main thread cannot touch the backend
/// while frames are being pumped.
pub struct RecordingWorker<S: FrameSource + 'static> {
    keep_recording: Arc<AtomicBool>,
    failed: Arc<AtomicBool>,
    handle: Option<JoinHandle<WorkerOutput<S>>>,
}

impl<S: FrameSource + 'static> RecordingWorker<S> {
    /// Start pumping frames from `capture` on a new thread.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::WorkerSpawn`] if the thread cannot be created.
    /// The capture session is released in that case.
    #[track_caller]
    pub fn spawn(capture: CaptureSession<S>, session_id: Uuid) -> CoreResult<Self> {
        let keep_recording = Arc::new(AtomicBool::new(true));
        let failed = Arc::new(AtomicBool::new(false));

        let handle = {
            let keep_recording = Arc::clone(&keep_recording);
            let failed = Arc::clone(&failed);
            thread::Builder::new()
                .name("recording-worker".to_string())
                .spawn(move || {
                    let mut capture = capture;
                    let report = pump_frames(&mut capture, &keep_recording, &failed, session_id);
                    (capture, report)
                })
                .map_err(|e| CaptureError::WorkerSpawn {
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                })?
        };

        debug!(session_id = %session_id, "Recording worker spawned");

        Ok(Self {
            keep_recording,
            failed,
            handle: Some(handle),
        })
    }

    /// Whether the worker stopped because an acquisition failed.
    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Ask the worker to stop after the acquisition in progress.
    pub fn stop(&self) {
        self.keep_recording.store(false, Ordering::Release);
    }

    /// Stop the worker and wait for it, returning the capture session.
    ///
    /// Blocks for at most one acquisition when the backend is healthy.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::WorkerPanicked`] if the worker thread
    /// panicked; the capture session was released during unwinding.
    #[track_caller]
    pub fn join(mut self) -> CoreResult<WorkerOutput<S>> {
        self.stop();

        let handle = self
            .handle
            .take()
            .ok_or_else(|| CaptureError::CaptureUnavailable {
                location: ErrorLocation::from(Location::caller()),
            })?;

        handle.join().map_err(|_| CaptureError::WorkerPanicked {
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl<S: FrameSource + 'static> Drop for RecordingWorker<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.stop();
            if handle.join().is_err() {
                error!("Recording worker panicked during teardown");
            }
        }
    }
}

fn pump_frames<S: FrameSource>(
    capture: &mut CaptureSession<S>,
    keep_recording: &AtomicBool,
    failed: &AtomicBool,
    session_id: Uuid,
) -> WorkerReport {
    let mut report = WorkerReport::default();

    info!(session_id = %session_id, "Pumping frames");

    while keep_recording.load(Ordering::Acquire) {
        match capture.acquire_frame() {
            SdkStatus::Ok => {}
            SdkStatus::Warning { code, message } => {
                report.warnings += 1;
                warn!(session_id = %session_id, code, message = %message, "Frame acquired with warning");
            }
            status @ SdkStatus::Error { .. } => {
                // TODO: recover from a stream-config-changed status instead of stopping.
                error!(session_id = %session_id, status = %status, "Frame acquisition failed");
                report.failure = Some(status);
                failed.store(true, Ordering::Release);
                break;
            }
        }

        capture.release_frame();
        report.frames += 1;
    }

    info!(
        session_id = %session_id,
        frames = report.frames,
        warnings = report.warnings,
        failed = report.failure.is_some(),
        "Frame pump stopped"
    );

    report
}
