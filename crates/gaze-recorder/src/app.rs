use crate::{
    AppResult, Sprite, Surface,
    config::Config,
    output_path::prepare_capture_path,
    prompt,
    surface::BACKGROUND,
};

use std::time::Instant;

use gaze_recorder_core::{
    CaptureSession, FrameSource, Session, SessionState, SyntheticCamera,
};
use tracing::{info, instrument};

/// Main application state.
///
/// Owns every collaborator. Fields drop in declaration order, which is
/// the reverse of acquisition: the window closes before the capture
/// backend is released.
pub struct App {
    surface: Surface,
    marker: Sprite,
    session: Session<SyntheticCamera>,
}

impl App {
    /// Acquire the capture backend, then the window and marker.
    #[instrument(skip(config))]
    pub(crate) fn new(config: &Config) -> AppResult<Self> {
        let mut camera = SyntheticCamera::create()?;
        if let Some(frames) = config.capture.fail_after_frames {
            camera = camera.fail_after(frames);
        }

        let output_path = prepare_capture_path(&config.capture, camera.file_extension())?;
        info!(output_path = ?output_path, backend = camera.name(), "Recording to");

        let capture = CaptureSession::open(camera, &output_path, &config.capture.stream_specs())?;
        let choreography = config.guidance.choreography()?;

        let surface = Surface::open(&config.window)?;
        let marker = Sprite::load(&config.guidance)?;

        Ok(Self {
            surface,
            marker,
            session: Session::new(capture, choreography),
        })
    }

    /// Run the event/render loop until the session quits.
    #[instrument(skip(self))]
    pub(crate) fn run(mut self) -> AppResult<()> {
        info!(session_id = %self.session.id(), "Gaze Recorder starting");

        while self.session.state() != SessionState::Quitting {
            let now = Instant::now();
            for event in self.surface.poll_events() {
                self.session.handle_event(event, now)?;
                if self.session.state() == SessionState::Quitting {
                    break;
                }
            }
            if self.session.state() == SessionState::Quitting {
                break;
            }

            let frame = self.session.update(Instant::now())?;

            let caption = prompt::caption(frame.state, self.session.output_path());
            self.surface.set_caption(&caption);

            self.surface.clear(BACKGROUND);
            if let Some(position) = frame.guidance {
                self.surface.draw_centered(&self.marker, position);
            }
            self.surface.present()?;
        }

        let output_path = self.session.output_path().to_path_buf();
        let App {
            surface, session, ..
        } = self;
        drop(surface);
        session.close()?;

        info!(output_path = ?output_path, "Gaze Recorder shut down successfully");

        Ok(())
    }
}
