//! Gaze Recorder: records color+depth video while a moving dot guides the user's gaze.

mod app;
mod config;
mod error;
mod fatal_report;
mod output_path;
mod prompt;
mod sprite;
mod surface;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    sprite::Sprite,
    surface::Surface,
};

use crate::{config::Config, fatal_report::report_fatal};

use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "gaze_recorder=debug,gaze_recorder_core=debug";

/// Application entry point.
fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Every collaborator is released inside `run` before exiting.
    let code = match run() {
        Ok(()) => 0,
        Err(e) => {
            report_fatal(&e);
            e.exit_code()
        }
    };

    info!(exit_code = code, "Exiting");
    std::process::exit(code);
}

fn run() -> AppResult<()> {
    let config = Config::load()?;
    let app = App::new(&config)?;
    app.run()
}
