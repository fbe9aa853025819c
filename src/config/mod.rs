//! Watermark configuration.
//!
//! [`WatermarkConfig`] is built once from the command-line values and never
//! changes afterwards. Its constructor is the only place font size and
//! opacity are range-checked, so every config that exists is valid.

use crate::constants::{MAX_FONT_SIZE, MAX_OPACITY, MIN_FONT_SIZE, MIN_OPACITY};
use crate::watermark::color::Color;
use crate::watermark::position::Anchor;
use thiserror::Error;

/// Rejected configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Font size must be between {min} and {max}, got {value}", min = MIN_FONT_SIZE, max = MAX_FONT_SIZE)]
    FontSize { value: i64 },

    #[error("Opacity must be between {min} and {max}, got {value}", min = MIN_OPACITY, max = MAX_OPACITY)]
    Opacity { value: i64 },
}

/// Settings shared by every image in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkConfig {
    /// Font size in pixels (1-200)
    pub font_size: u32,
    /// Text color
    pub color: Color,
    /// Where the date goes
    pub position: Anchor,
    /// Text alpha (0-255); the shadow uses half of it
    pub opacity: u8,
}

impl WatermarkConfig {
    /// Validate raw values and build a config.
    ///
    /// Opacity is checked first, matching the order the CLI reports errors.
    pub fn new(
        font_size: i64,
        color: Color,
        position: Anchor,
        opacity: i64,
    ) -> Result<Self, ConfigError> {
        if !(MIN_OPACITY..=MAX_OPACITY).contains(&opacity) {
            return Err(ConfigError::Opacity { value: opacity });
        }

        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&font_size) {
            return Err(ConfigError::FontSize { value: font_size });
        }

        Ok(Self {
            font_size: font_size as u32,
            color,
            position,
            opacity: opacity as u8,
        })
    }
}
