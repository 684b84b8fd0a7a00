use crate::{CaptureError, CoreResult};

use std::{fmt, panic::Location};

use error_location::ErrorLocation;
use tracing::warn;

/// Outcome of a single capture backend call.
///
/// Backends report a raw status code where zero means success, positive
/// values are advisory warnings and negative values are errors. Only
/// [`SdkStatus::Error`] is treated as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkStatus {
    /// The call succeeded.
    Ok,
    /// The call succeeded with an advisory warning.
    Warning {
        /// Backend-provided status code (positive).
        code: i32,
        /// Backend-provided status message.
        message: String,
    },
    /// The call failed.
    Error {
        /// Backend-provided status code (negative).
        code: i32,
        /// Backend-provided status message.
        message: String,
    },
}

impl SdkStatus {
    /// Classify a raw backend status code.
    pub fn from_code(code: i32, message: impl Into<String>) -> Self {
        match code {
            0 => SdkStatus::Ok,
            c if c > 0 => SdkStatus::Warning {
                code: c,
                message: message.into(),
            },
            c => SdkStatus::Error {
                code: c,
                message: message.into(),
            },
        }
    }

    /// Raw status code, zero for [`SdkStatus::Ok`].
    pub fn code(&self) -> i32 {
        match self {
            SdkStatus::Ok => 0,
            SdkStatus::Warning { code, .. } | SdkStatus::Error { code, .. } => *code,
        }
    }

    /// Whether this status is a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, SdkStatus::Error { .. })
    }

    /// Convert to a result for `operation`, logging warnings and
    /// turning errors into [`CaptureError::Sdk`].
    #[track_caller]
    pub fn check(self, operation: &'static str) -> CoreResult<()> {
        match self {
            SdkStatus::Ok => Ok(()),
            SdkStatus::Warning { code, message } => {
                warn!(operation, code, message = %message, "Capture backend warning");
                Ok(())
            }
            SdkStatus::Error { code, message } => Err(CaptureError::Sdk {
                operation,
                code,
                message,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl fmt::Display for SdkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdkStatus::Ok => write!(f, "no error"),
            SdkStatus::Warning { code, message } => write!(f, "warning #{code}: {message}"),
            SdkStatus::Error { code, message } => write!(f, "error #{code}: {message}"),
        }
    }
}
