//! Text measurement and drawing.
//!
//! Both operations walk the same glyph coverage produced by the selected
//! [`Typeface`] and ignore coverage below [`INK_THRESHOLD`], so the
//! measured box is exactly the set of pixels that get painted. Coordinates inside a layout start at the pen origin with the
//! ascent line at `y = 0`; [`TextBounds`] records where the ink begins so
//! drawing can put the ink's top-left corner on the requested position.
//!
//! # Example
//!
//! ```
//! use datemark::watermark::font::Typeface;
//! use datemark::watermark::position::PlacementPosition;
//! use datemark::watermark::text_renderer::{draw_text, measure_text};
//! use image::{Rgba, RgbaImage};
//!
//! let face = Typeface::Builtin;
//! let bounds = measure_text(&face, "2024-01-02", 14.0);
//!
//! let mut layer = RgbaImage::new(200, 40);
//! draw_text(&mut layer, &face, "2024-01-02", 14.0, PlacementPosition::new(4, 4), &bounds, Rgba([255, 255, 255, 200]));
//! assert!(layer.pixels().any(|p| p[3] > 0));
//! ```

use super::font::{bitmap_glyph, bitmap_unit, Typeface, GLYPH_COLUMNS, GLYPH_SPACING};
use super::position::{PlacementPosition, TextDimensions};
use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Smallest glyph coverage that counts as ink: one step of 8-bit alpha.
pub const INK_THRESHOLD: f32 = 1.0 / 255.0;

/// Ink bounding box of a piece of text, in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    /// Leftmost inked column.
    pub left: i32,
    /// Topmost inked row.
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl TextBounds {
    pub fn dimensions(&self) -> TextDimensions {
        TextDimensions {
            width: self.width,
            height: self.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Measure the ink bounding box of `text` at `font_size` pixels.
///
/// Text without any visible pixels (empty, or only spaces) measures as an
/// empty box at the origin.
pub fn measure_text(face: &Typeface, text: &str, font_size: f32) -> TextBounds {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;

    rasterize(face, text, font_size, |x, y, coverage| {
        if coverage >= INK_THRESHOLD {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    });

    if min_x > max_x {
        return TextBounds::default();
    }

    TextBounds {
        left: min_x,
        top: min_y,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    }
}

/// Draw `text` into `layer` so the ink's top-left corner lands on `origin`.
///
/// `bounds` must come from [`measure_text`] with the same face, text and
/// size. Pixels falling outside the layer are dropped.
pub fn draw_text(
    layer: &mut RgbaImage,
    face: &Typeface,
    text: &str,
    font_size: f32,
    origin: PlacementPosition,
    bounds: &TextBounds,
    ink: Rgba<u8>,
) {
    let width = layer.width() as i32;
    let height = layer.height() as i32;
    let shift_x = origin.x - bounds.left;
    let shift_y = origin.y - bounds.top;

    rasterize(face, text, font_size, |x, y, coverage| {
        let px = x + shift_x;
        let py = y + shift_y;

        if coverage >= INK_THRESHOLD && px >= 0 && py >= 0 && px < width && py < height {
            let existing = layer.get_pixel(px as u32, py as u32);
            let painted = paint_coverage(*existing, ink, coverage);
            layer.put_pixel(px as u32, py as u32, painted);
        }
    });
}

/// Move `existing` toward `ink` by the glyph coverage, alpha included.
///
/// Full coverage replaces the pixel with the ink, matching how text is
/// stamped onto a transparent layer before compositing.
fn paint_coverage(existing: Rgba<u8>, ink: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let c = coverage.clamp(0.0, 1.0);
    if c >= 1.0 {
        return ink;
    }

    let mix = |e: u8, i: u8| -> u8 {
        let e = e as f32;
        let i = i as f32;
        (e + (i - e) * c).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        mix(existing[0], ink[0]),
        mix(existing[1], ink[1]),
        mix(existing[2], ink[2]),
        mix(existing[3], ink[3]),
    ])
}

/// Walk every pixel the face covers for `text`, reporting layout
/// coordinates and coverage in 0.0..=1.0.
fn rasterize(face: &Typeface, text: &str, font_size: f32, plot: impl FnMut(i32, i32, f32)) {
    match face {
        Typeface::Outline { font, .. } => rasterize_outline(font, text, font_size, plot),
        Typeface::Builtin => rasterize_bitmap(text, font_size, plot),
    }
}

fn rasterize_outline(font: &FontVec, text: &str, font_size: f32, mut plot: impl FnMut(i32, i32, f32)) {
    let scale = PxScale::from(font_size);
    let scaled_font = font.as_scaled(scale);
    let baseline_y = scaled_font.ascent();

    let mut cursor_x = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let origin_x = bounds.min.x as i32;
            let origin_y = bounds.min.y as i32;

            outlined.draw(|px, py, coverage| {
                plot(origin_x + px as i32, origin_y + py as i32, coverage);
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }
}

fn rasterize_bitmap(text: &str, font_size: f32, mut plot: impl FnMut(i32, i32, f32)) {
    let unit = bitmap_unit(font_size) as i32;
    let advance = (GLYPH_COLUMNS + GLYPH_SPACING) as i32 * unit;

    for (index, c) in text.chars().enumerate() {
        let glyph_x = index as i32 * advance;

        for (row, bits) in bitmap_glyph(c).into_iter().enumerate() {
            for column in 0..GLYPH_COLUMNS {
                // Leftmost column is the highest of the five bits
                if (bits >> (GLYPH_COLUMNS - 1 - column)) & 1 == 0 {
                    continue;
                }

                let cell_x = glyph_x + column as i32 * unit;
                let cell_y = row as i32 * unit;
                for dy in 0..unit {
                    for dx in 0..unit {
                        plot(cell_x + dx, cell_y + dy, 1.0);
                    }
                }
            }
        }
    }
}
