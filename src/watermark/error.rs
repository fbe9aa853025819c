//! Watermark error types.
//!
//! Defines errors that can occur while stamping a single image. None of
//! these abort a batch: the batch processor logs them and moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during watermark processing.
#[derive(Error, Debug)]
pub enum WatermarkError {
    /// Reading the source or writing the destination failed
    #[error("I/O error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source could not be decoded as an image
    #[error("Failed to decode image '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The watermarked image could not be encoded
    #[error("Failed to encode image '{}': {message}", path.display())]
    Encode { path: PathBuf, message: String },

    /// A candidate font file exists but is not a usable font
    #[error("Failed to load font '{}': {message}", path.display())]
    Font { path: PathBuf, message: String },

    /// The destination extension maps to no supported encoder
    #[error("Unsupported output format for '{}'", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A color string could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

impl WatermarkError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an encode error.
    pub fn encode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Encode {
            path: path.into(),
            message: message.into(),
        }
    }
}
