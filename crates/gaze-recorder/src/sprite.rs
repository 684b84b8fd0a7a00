//! Guidance marker bitmap.

use crate::{AppError, AppResult, config::GuidanceConfig};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// An ARGB bitmap (`0xAARRGGBB` per pixel, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Sprite {
    /// Load the configured marker, or generate a disc if none is set.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn load(config: &GuidanceConfig) -> AppResult<Self> {
        match &config.marker_path {
            Some(path) => Self::from_png(path),
            None => {
                let radius = config.checked_marker_radius()?;
                let rgb = config.marker_rgb()?;
                Self::disc(radius, rgb).ok_or_else(|| AppError::ConfigError {
                    reason: format!("Marker radius {} is too large", radius),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Decode a PNG file.
    #[track_caller]
    pub fn from_png(path: &Path) -> AppResult<Self> {
        let img = image::open(path).map_err(|e| AppError::MarkerError {
            reason: format!("Failed to load {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);
        let pixels = rgba
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                u32::from_be_bytes([a, r, g, b])
            })
            .collect();

        debug!(path = ?path, width, height, "Marker image loaded");

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A filled opaque disc of `radius` pixels in color `0x00RRGGBB`.
    ///
    /// Returns `None` if the bitmap size overflows.
    pub fn disc(radius: u32, rgb: u32) -> Option<Self> {
        let r = i64::from(radius);
        let size = usize::try_from(radius)
            .ok()?
            .checked_mul(2)?
            .checked_add(1)?;
        let opaque = 0xFF00_0000 | (rgb & 0x00FF_FFFF);

        let mut pixels = vec![0u32; size.checked_mul(size)?];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            let dx = (i % size) as i64 - r;
            let dy = (i / size) as i64 - r;
            if dx * dx + dy * dy <= r * r {
                *pixel = opaque;
            }
        }

        Some(Self {
            width: size,
            height: size,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// Alpha-blend ARGB `src` over opaque RGB `dst`.
pub(crate) fn blend(dst: u32, src: u32) -> u32 {
    let alpha = src >> 24;
    match alpha {
        0 => dst,
        0xFF => src & 0x00FF_FFFF,
        a => {
            let channel = |shift: u32| {
                let s = (src >> shift) & 0xFF;
                let d = (dst >> shift) & 0xFF;
                ((s * a + d * (0xFF - a)) / 0xFF) << shift
            };
            channel(16) | channel(8) | channel(0)
        }
    }
}
