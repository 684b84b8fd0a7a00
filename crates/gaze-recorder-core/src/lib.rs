//! Gaze Recorder Core Library
//!
//! Drives a depth-camera capture backend while a guidance marker walks the
//! user's gaze around the screen.
//!
//! # Example
//!
//! ```no_run
//! use gaze_recorder_core::{
//!     CaptureSession, Choreography, CoreResult, Session, SessionEvent, StreamSpec,
//!     SyntheticCamera,
//! };
//!
//! use std::{path::Path, time::Instant};
//!
//! fn main() -> CoreResult<()> {
//!     let camera = SyntheticCamera::create()?;
//!     let capture = CaptureSession::open(camera, Path::new("take.synth"), &StreamSpec::defaults())?;
//!     let mut session = Session::new(capture, Choreography::reference());
//!
//!     session.handle_event(SessionEvent::Trigger, Instant::now())?;
//!     while session.update(Instant::now())?.guidance.is_some() {}
//!
//!     session.close()
//! }
//! ```

mod capture;
mod choreography;
mod error;
mod recording;

pub use {
    capture::{
        CaptureSession, FrameSource, SdkStatus, StreamKind, StreamSpec, SyntheticCamera, synthetic,
    },
    choreography::{Axis, Choreography, GuidancePosition, Segment, lerp},
    error::{CaptureError, Result as CoreResult},
    recording::{Frame, RecordingWorker, Session, SessionEvent, SessionState, WorkerReport},
};

#[cfg(test)]
mod tests;
