mod session;
mod session_state;
mod worker;

pub use {
    session::{Frame, Session},
    session_state::{SessionEvent, SessionState},
    worker::{RecordingWorker, WorkerReport},
};
