//! Capture date extraction.
//!
//! The date stamped on a photo comes from its EXIF block when one of the
//! capture time tags parses, otherwise from the file's modification time.
//! Tags are tried in a fixed priority order:
//!
//! 1. `DateTimeOriginal` (shutter time)
//! 2. `DateTimeDigitized`
//! 3. `DateTime` (last modification recorded by the camera or editor)
//!
//! EXIF timestamps use the `YYYY:MM:DD HH:MM:SS` layout; dates are returned
//! as `YYYY-MM-DD`.

use chrono::{DateTime, Local, NaiveDateTime};
use exif::{Exif, In, Tag, Value};
use std::fs::File;
use std::io::{self, BufReader, Seek};
use std::path::{Path, PathBuf};

/// EXIF tags holding a capture time, highest priority first.
pub const DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A discovered image and the date to stamp on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    /// `YYYY-MM-DD`, or `None` when the file could not be read.
    pub inferred_date: Option<String>,
}

impl ImageRecord {
    /// Look up the date for `path`.
    pub fn inspect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let inferred_date = capture_date(&path);
        Self {
            path,
            inferred_date,
        }
    }

    /// File name for display, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Date to stamp on the image at `path`, as `YYYY-MM-DD`.
///
/// Returns `None` (after logging why) if the file cannot be opened, is not
/// a recognised image, or has no readable modification time.
pub fn capture_date(path: &Path) -> Option<String> {
    match try_capture_date(path) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read image date");
            None
        }
    }
}

fn try_capture_date(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let format = image::io::Reader::new(&mut reader)
        .with_guessed_format()?
        .format();
    if format.is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "unrecognised image format",
        ));
    }
    reader.rewind()?;

    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => {
            if let Some(date) = exif_capture_date(&exif) {
                return Ok(date);
            }
            tracing::debug!(path = %path.display(), "No usable EXIF date, using modification time");
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No EXIF data, using modification time");
        }
    }

    modified_date(path)
}

/// First capture date tag in [`DATE_TAGS`] order that parses.
pub fn exif_capture_date(exif: &Exif) -> Option<String> {
    DATE_TAGS.iter().find_map(|tag| {
        let field = exif.get_field(*tag, In::PRIMARY)?;
        let text = ascii_value(&field.value)?;
        parse_exif_datetime(&text).map(|dt| dt.format(OUTPUT_DATE_FORMAT).to_string())
    })
}

/// Parse an EXIF `YYYY:MM:DD HH:MM:SS` timestamp.
///
/// Surrounding whitespace and trailing NULs (common padding) are ignored.
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    NaiveDateTime::parse_from_str(trimmed, EXIF_DATETIME_FORMAT).ok()
}

/// The file's modification time in local time, as `YYYY-MM-DD`.
pub fn modified_date(path: &Path) -> io::Result<String> {
    let modified = std::fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(local.format(OUTPUT_DATE_FORMAT).to_string())
}

fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) => parts
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}
