//! Recording session state machine.
//!
//! Owns the lifecycle of one recording attempt: waits for a trigger,
//! pumps frames on a [`RecordingWorker`] while the guidance marker follows
//! the [`Choreography`], then waits for the user to quit.

use crate::{
    CaptureError, CoreResult,
    capture::{CaptureSession, FrameSource, SdkStatus},
    choreography::{Choreography, GuidancePosition},
    recording::{RecordingWorker, SessionEvent, SessionState, WorkerReport},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// What the presentation layer should draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Session state after the update.
    pub state: SessionState,
    /// Where to draw the guidance marker, if it is visible.
    pub guidance: Option<GuidancePosition>,
}

/// A single recording attempt.
///
/// All methods run on the main thread. The capture session is owned here
/// while idle and by the worker while recording.
pub struct Session<S: FrameSource + 'static> {
    id: Uuid,
    state: SessionState,
    recording_started_at: Option<Instant>,
    output_path: PathBuf,
    choreography: Choreography,
    // Declared before `capture` so a live worker is joined first on drop.
    worker: Option<RecordingWorker<S>>,
    capture: Option<CaptureSession<S>>,
    last_report: Option<WorkerReport>,
}

impl<S: FrameSource + 'static> Session<S> {
    /// Create a session in [`SessionState::Preparing`].
    pub fn new(capture: CaptureSession<S>, choreography: Choreography) -> Self {
        let id = Uuid::new_v4();
        let output_path = capture.output_path().to_path_buf();

        info!(
            session_id = %id,
            output_path = ?output_path,
            duration_s = choreography.duration(),
            "Session created"
        );

        Self {
            id,
            state: SessionState::Preparing,
            recording_started_at: None,
            output_path,
            choreography,
            worker: None,
            capture: Some(capture),
            last_report: None,
        }
    }

    /// Apply an input event observed at `now`.
    ///
    /// # Errors
    ///
    /// Fails if the recording worker cannot be started, or if stopping it
    /// reveals a failed acquisition. The session is in
    /// [`SessionState::Quitting`] after any error.
    #[instrument(skip(self), fields(session_id = %self.id, state = %self.state))]
    pub fn handle_event(&mut self, event: SessionEvent, now: Instant) -> CoreResult<()> {
        match (self.state, event) {
            (SessionState::Quitting, _) => Ok(()),
            (SessionState::Recording, SessionEvent::Quit) => {
                info!("Quit requested while recording");
                self.leave_recording(SessionState::Quitting)
            }
            (_, SessionEvent::Quit) => {
                self.transition(SessionState::Quitting);
                Ok(())
            }
            (SessionState::Preparing, SessionEvent::Trigger) => self.start_recording(now),
            (SessionState::Recording, SessionEvent::Trigger) => {
                debug!("Trigger ignored while recording");
                Ok(())
            }
            (SessionState::Done, SessionEvent::Trigger) => {
                self.transition(SessionState::Quitting);
                Ok(())
            }
        }
    }

    /// Advance time to `now` and report what to draw.
    ///
    /// While recording, stops the worker and moves to
    /// [`SessionState::Done`] once the choreography is complete.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::AcquisitionFailed`] once the worker has
    /// stopped on a failed acquisition. The worker is joined and the
    /// session is in [`SessionState::Quitting`] when this returns an error.
    pub fn update(&mut self, now: Instant) -> CoreResult<Frame> {
        match self.state {
            SessionState::Preparing => Ok(Frame {
                state: self.state,
                guidance: Some(self.choreography.initial()),
            }),
            SessionState::Recording => self.update_recording(now),
            SessionState::Done | SessionState::Quitting => Ok(Frame {
                state: self.state,
                guidance: None,
            }),
        }
    }

    fn update_recording(&mut self, now: Instant) -> CoreResult<Frame> {
        if self.worker.as_ref().is_some_and(RecordingWorker::has_failed) {
            self.leave_recording(SessionState::Quitting)?;
            return Ok(Frame {
                state: self.state,
                guidance: None,
            });
        }

        let elapsed = self.elapsed(now).unwrap_or_default();

        match self.choreography.position_at(elapsed.as_secs_f64()) {
            Some(position) => Ok(Frame {
                state: self.state,
                guidance: Some(position),
            }),
            None => {
                info!(
                    session_id = %self.id,
                    elapsed_ms = elapsed.as_millis(),
                    "Choreography complete"
                );
                self.leave_recording(SessionState::Done)?;
                Ok(Frame {
                    state: self.state,
                    guidance: None,
                })
            }
        }
    }

    #[track_caller]
    fn start_recording(&mut self, now: Instant) -> CoreResult<()> {
        let capture = self
            .capture
            .take()
            .ok_or_else(|| CaptureError::CaptureUnavailable {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let worker = match RecordingWorker::spawn(capture, self.id) {
            Ok(w) => w,
            Err(e) => {
                self.transition(SessionState::Quitting);
                return Err(e);
            }
        };

        self.worker = Some(worker);
        self.recording_started_at = Some(now);
        self.transition(SessionState::Recording);

        Ok(())
    }

    /// Join the worker, take the capture back and move to `next`, or to
    /// Quitting if the worker failed.
    #[track_caller]
    fn leave_recording(&mut self, next: SessionState) -> CoreResult<()> {
        let result = self.join_worker();
        self.transition(if result.is_ok() {
            next
        } else {
            SessionState::Quitting
        });
        result
    }

    #[track_caller]
    fn join_worker(&mut self) -> CoreResult<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        let (capture, report) = worker.join()?;
        self.capture = Some(capture);

        info!(
            session_id = %self.id,
            frames = report.frames,
            warnings = report.warnings,
            "Recording worker joined"
        );

        let failure = report.failure.clone();
        self.last_report = Some(report);

        match failure {
            Some(SdkStatus::Error { code, message }) => Err(CaptureError::AcquisitionFailed {
                code,
                message,
                location: ErrorLocation::from(Location::caller()),
            }),
            _ => Ok(()),
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(next >= self.state, "backward transition {} -> {next}", self.state);
        if next != self.state {
            info!(session_id = %self.id, from = %self.state, to = %next, "Session state changed");
            self.state = next;
        }
    }

    /// Release the capture backend, stopping the worker first if needed.
    ///
    /// # Errors
    ///
    /// Returns the worker's acquisition failure if it had not been
    /// reported yet.
    pub fn close(mut self) -> CoreResult<()> {
        let result = self.join_worker();
        if let Some(capture) = self.capture.take() {
            capture.close();
        }
        debug!(session_id = %self.id, "Session closed");
        result
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Session identifier used in logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When recording started, if it has.
    pub fn recording_started_at(&self) -> Option<Instant> {
        self.recording_started_at
    }

    /// Time since recording started, if it has.
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.recording_started_at
            .map(|start| now.saturating_duration_since(start))
    }

    /// File the capture backend records into.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// The guidance path followed while recording.
    pub fn choreography(&self) -> &Choreography {
        &self.choreography
    }

    /// Number of recording workers currently alive (0 or 1).
    pub fn live_workers(&self) -> usize {
        usize::from(self.worker.is_some())
    }

    /// Report of the last joined worker.
    pub fn last_report(&self) -> Option<&WorkerReport> {
        self.last_report.as_ref()
    }
}
