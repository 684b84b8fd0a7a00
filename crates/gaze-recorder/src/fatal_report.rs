//! User-facing report for errors that end the process.

use crate::AppError;

use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::{debug, error};

const DIALOG_TITLE: &str = "Gaze Recorder error";

/// Log `error` and show it in a modal error dialog.
///
/// Blocks until the user dismisses the dialog.
pub(crate) fn report_fatal(error: &AppError) {
    error!(error = ?error, exit_code = error.exit_code(), "Fatal error");

    let result = MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(DIALOG_TITLE)
        .set_description(dialog_text(error))
        .set_buttons(MessageButtons::Ok)
        .show();

    debug!(result = ?result, "Error dialog closed");
}

/// Body of the error dialog.
pub(crate) fn dialog_text(error: &AppError) -> String {
    format!("{}\n\nExit code {}.", error, error.exit_code())
}
