use error_location::ErrorLocation;
use thiserror::Error;

/// Capture and session errors with source location tracking.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// A capture backend call reported an error status.
    #[error("Capture backend error #{code} while {operation}: {message} {location}")]
    Sdk {
        /// The backend operation that failed.
        operation: &'static str,
        /// Backend-provided status code.
        code: i32,
        /// Backend-provided status message.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No streams were requested from the capture backend.
    #[error("No capture streams requested {location}")]
    NoStreams {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recording worker stopped because frame acquisition failed.
    #[error("Frame acquisition failed with status #{code}: {message} {location}")]
    AcquisitionFailed {
        /// Backend-provided status code.
        code: i32,
        /// Backend-provided status message.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recording worker thread could not be started.
    #[error("Failed to spawn recording worker: {source} {location}")]
    WorkerSpawn {
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recording worker thread panicked.
    #[error("Recording worker panicked {location}")]
    WorkerPanicked {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capture session was already handed out or torn down.
    #[error("Capture session unavailable {location}")]
    CaptureUnavailable {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A choreography definition was rejected.
    #[error("Invalid choreography: {reason} {location}")]
    InvalidChoreography {
        /// Description of the problem.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CaptureError`].
pub type Result<T> = std::result::Result<T, CaptureError>;
