use std::fmt;

/// Lifecycle of a recording session.
///
/// Transitions only move forward: Preparing, Recording, Done, Quitting.
/// Quitting can be entered from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// Waiting for the user to start.
    Preparing,
    /// Frames are being pumped and the marker is moving.
    Recording,
    /// The choreography finished; waiting for the user to quit.
    Done,
    /// The main loop should exit.
    Quitting,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Preparing => write!(f, "preparing"),
            SessionState::Recording => write!(f, "recording"),
            SessionState::Done => write!(f, "done"),
            SessionState::Quitting => write!(f, "quitting"),
        }
    }
}

/// Input delivered to the session by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A key was released.
    Trigger,
    /// The window was closed or the user asked to quit.
    Quit,
}
