//! Position calculation for watermark placement.
//!
//! Maps a named [`Anchor`] plus image and text dimensions to the top-left
//! pixel where the text should be drawn.
//!
//! # Anchors
//!
//! `top-left`, `top-center`, `top-right`, `center`, `bottom-left`,
//! `bottom-center`, `bottom-right`. Every edge an anchor touches keeps a
//! fixed margin; centered axes use floor division.
//!
//! # Example
//!
//! ```
//! use datemark::watermark::position::{
//!     calculate_position, Anchor, ImageDimensions, PlacementPosition, TextDimensions,
//! };
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let text = TextDimensions { width: 100, height: 50 };
//!
//! let pos = calculate_position(Anchor::BottomRight, &image, &text, 20);
//! assert_eq!(pos, PlacementPosition::new(680, 530)); // 800 - 100 - 20, 600 - 50 - 20
//! ```

use std::fmt;

/// Named position of the watermark on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Anchor {
    /// All anchors, in grid order.
    pub const ALL: [Anchor; 7] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::Center,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// The kebab-case name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::Center => "center",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Lenient lookup by name. Unknown names fall back to bottom-right.
    ///
    /// The CLI does not go through here: clap's `ValueEnum` parser rejects
    /// unknown positions instead.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|anchor| anchor.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the rendered text's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct TextDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left corner where the text should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift the position by the given amounts.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Calculate the draw origin for an anchored text box.
///
/// # Arguments
///
/// * `anchor` - The named position
/// * `image` - Dimensions of the target image
/// * `text` - Dimensions of the text bounding box
/// * `margin` - Margin from the touched edges in pixels
///
/// # Returns
///
/// The (x, y) coordinates of the text's top-left corner. Coordinates are not
/// clamped and may be negative when the text is larger than the image.
pub fn calculate_position(
    anchor: Anchor,
    image: &ImageDimensions,
    text: &TextDimensions,
    margin: u32,
) -> PlacementPosition {
    let img_w = image.width as i32;
    let img_h = image.height as i32;
    let txt_w = text.width as i32;
    let txt_h = text.height as i32;
    let m = margin as i32;

    let left = m;
    let center_x = (img_w - txt_w).div_euclid(2);
    let right = img_w - txt_w - m;
    let top = m;
    let bottom = img_h - txt_h - m;

    match anchor {
        Anchor::TopLeft => PlacementPosition::new(left, top),
        Anchor::TopCenter => PlacementPosition::new(center_x, top),
        Anchor::TopRight => PlacementPosition::new(right, top),
        Anchor::Center => PlacementPosition::new(center_x, (img_h - txt_h).div_euclid(2)),
        Anchor::BottomLeft => PlacementPosition::new(left, bottom),
        Anchor::BottomCenter => PlacementPosition::new(center_x, bottom),
        Anchor::BottomRight => PlacementPosition::new(right, bottom),
    }
}
