//! Guidance window backed by minifb.
//!
//! Clears, draws sprites at normalized positions and presents a software
//! framebuffer, and turns window input into session events.

use crate::{AppError, AppResult, Sprite, config::WindowConfig, sprite::blend};

use std::panic::Location;

use error_location::ErrorLocation;
use gaze_recorder_core::{GuidancePosition, SessionEvent};
use minifb::{Key, Window, WindowOptions};
use tracing::{debug, info, instrument};

const WINDOW_TITLE: &str = "Gaze Recorder";

/// Clear color (black).
pub const BACKGROUND: u32 = 0x0000_0000;

/// The on-screen presentation surface.
pub struct Surface {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    caption: String,
}

impl Surface {
    /// Open the guidance window.
    #[track_caller]
    #[instrument]
    pub fn open(config: &WindowConfig) -> AppResult<Self> {
        let (width, height) = (config.width, config.height);
        if width == 0 || height == 0 {
            return Err(AppError::WindowError {
                reason: format!("Invalid window size {}x{}", width, height),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let options = WindowOptions {
            borderless: config.fullscreen,
            title: !config.fullscreen,
            topmost: config.fullscreen,
            resize: false,
            ..WindowOptions::default()
        };

        let mut window =
            Window::new(WINDOW_TITLE, width, height, options).map_err(|e| {
                AppError::WindowError {
                    reason: format!("Failed to open a window: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;
        window.set_target_fps(config.target_fps);

        info!(width, height, fullscreen = config.fullscreen, "Window opened");

        Ok(Self {
            window,
            buffer: vec![BACKGROUND; width * height],
            width,
            height,
            caption: WINDOW_TITLE.to_string(),
        })
    }

    /// Fill the framebuffer with `color` (`0x00RRGGBB`).
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Draw `sprite` centered on the normalized position.
    pub fn draw_centered(&mut self, sprite: &Sprite, position: GuidancePosition) {
        draw_centered_into(&mut self.buffer, self.width, self.height, sprite, position);
    }

    /// Show the framebuffer; also pumps the window's input queue.
    #[track_caller]
    pub fn present(&mut self) -> AppResult<()> {
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| AppError::WindowError {
                reason: format!("Failed to present frame: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Session events from input gathered by the last `present`.
    ///
    /// Any released key is a trigger, except Escape which quits. A closed
    /// window quits.
    pub fn poll_events(&self) -> Vec<SessionEvent> {
        if !self.window.is_open() {
            return vec![SessionEvent::Quit];
        }

        self.window
            .get_keys_released()
            .into_iter()
            .map(|key| match key {
                Key::Escape => SessionEvent::Quit,
                _ => SessionEvent::Trigger,
            })
            .collect()
    }

    /// Update the window caption if it changed.
    pub fn set_caption(&mut self, caption: &str) {
        if self.caption != caption {
            debug!(caption, "Caption changed");
            self.window.set_title(caption);
            self.caption = caption.to_string();
        }
    }
}

/// Blend `sprite` into a `width` x `height` framebuffer, centered on
/// `position` and clipped to the buffer.
pub(crate) fn draw_centered_into(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    sprite: &Sprite,
    position: GuidancePosition,
) {
    let left = (position.x * width as f64 - sprite.width() as f64 * 0.5) as i64;
    let top = (position.y * height as f64 - sprite.height() as f64 * 0.5) as i64;

    for sy in 0..sprite.height() {
        let y = top + sy as i64;
        if y < 0 || y >= height as i64 {
            continue;
        }
        for sx in 0..sprite.width() {
            let x = left + sx as i64;
            if x < 0 || x >= width as i64 {
                continue;
            }
            let index = y as usize * width + x as usize;
            buffer[index] = blend(buffer[index], sprite.pixel(sx, sy));
        }
    }
}
