//! Text color parsing.
//!
//! Accepts the forms users type on the command line:
//!
//! - one of eight color names (`white`, `black`, `red`, `green`, `blue`,
//!   `yellow`, `orange`, `purple`)
//! - `#RRGGBB` hex
//! - `R,G,B` decimal triples
//!
//! Parsing never fails: anything unrecognised falls back to white with a
//! warning.
//!
//! # Example
//!
//! ```
//! use datemark::watermark::color::{parse_color, Color};
//!
//! assert_eq!(parse_color("#FF8000"), Color::new(255, 128, 0));
//! assert_eq!(parse_color(" 10, 20, 30 "), Color::new(10, 20, 30));
//! assert_eq!(parse_color("not-a-color"), Color::white());
//! ```

use super::WatermarkError;
use std::fmt;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White color.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black color.
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Look up one of the named colors. `name` must already be lower-case.
    pub fn named(name: &str) -> Option<Self> {
        let color = match name {
            "white" => Self::white(),
            "black" => Self::black(),
            "red" => Self::new(255, 0, 0),
            "green" => Self::new(0, 255, 0),
            "blue" => Self::new(0, 0, 255),
            "yellow" => Self::new(255, 255, 0),
            "orange" => Self::new(255, 165, 0),
            "purple" => Self::new(128, 0, 128),
            _ => return None,
        };
        Some(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Parse a user supplied color string, falling back to white.
///
/// Named colors win over hex, hex wins over decimal triples. The input is
/// trimmed and lower-cased first.
pub fn parse_color(input: &str) -> Color {
    let normalized = input.trim().to_lowercase();

    if let Some(color) = Color::named(&normalized) {
        return color;
    }

    if normalized.starts_with('#') {
        if let Ok(color) = parse_hex_color(&normalized) {
            return color;
        }
    }

    if normalized.contains(',') {
        if let Ok(color) = parse_rgb_triple(&normalized) {
            return color;
        }
    }

    tracing::warn!(color = %input, "Could not parse color, using white");
    Color::white()
}

/// Parse a `#RRGGBB` hex color.
///
/// # Examples
///
/// ```
/// use datemark::watermark::color::{parse_hex_color, Color};
///
/// assert_eq!(parse_hex_color("#ff0000").unwrap(), Color::new(255, 0, 0));
/// assert!(parse_hex_color("#fff").is_err());
/// ```
pub fn parse_hex_color(hex: &str) -> Result<Color, WatermarkError> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| WatermarkError::InvalidColor(format!("'{}' must start with '#'", hex)))?;

    // from_str_radix would accept a leading '+', so check the digits ourselves
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WatermarkError::InvalidColor(format!(
            "'{}' is not in #RRGGBB format",
            hex
        )));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| WatermarkError::InvalidColor(format!("invalid hex digit in '{}'", hex)))
    };

    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Parse an `R,G,B` decimal triple with every component in 0-255.
fn parse_rgb_triple(input: &str) -> Result<Color, WatermarkError> {
    let components = input
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| WatermarkError::InvalidColor(format!("'{}': {}", input, e)))?;

    let channels = components
        .iter()
        .map(|&value| u8::try_from(value))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| {
            WatermarkError::InvalidColor(format!("'{}': components must be 0-255", input))
        })?;

    match channels.as_slice() {
        &[r, g, b] => Ok(Color::new(r, g, b)),
        _ => Err(WatermarkError::InvalidColor(format!(
            "'{}': expected 3 components, got {}",
            input,
            channels.len()
        ))),
    }
}
