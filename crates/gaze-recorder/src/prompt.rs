use gaze_recorder_core::SessionState;

use std::path::Path;

/// Caption shown for each session state.
pub(crate) fn caption(state: SessionState, output_path: &Path) -> String {
    match state {
        SessionState::Preparing => {
            "Follow the green dot with your eyes. Press any key to start.".to_string()
        }
        SessionState::Recording => format!("Recording into {}", output_path.display()),
        SessionState::Done => "Press any key to quit.".to_string(),
        SessionState::Quitting => "Closing...".to_string(),
    }
}
