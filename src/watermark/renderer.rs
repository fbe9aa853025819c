//! Date watermark rendering for a single file.
//!
//! Pipeline: decode → measure text → resolve position → draw shadow and
//! text on a transparent layer → composite → restore the original alpha
//! mode → encode.
//!
//! # Example
//!
//! ```ignore
//! use datemark::watermark::font::FontCatalog;
//! use datemark::watermark::renderer::render_watermark;
//!
//! let face = FontCatalog::platform_default().resolve();
//! let ok = render_watermark(src, dst, "2024-01-02", &config, &face);
//! ```

use super::compositor::alpha_composite;
use super::encoder::save_image;
use super::font::Typeface;
use super::position::{calculate_position, ImageDimensions};
use super::text_renderer::{draw_text, measure_text};
use super::WatermarkError;
use crate::config::WatermarkConfig;
use crate::constants::{EDGE_MARGIN, SHADOW_OFFSET};
use image::io::Reader as ImageReader;
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

/// Stamp `date_text` onto `source` and write the result to `destination`.
///
/// Failures are logged with the source path and reported as `false`.
pub fn render_watermark(
    source: &Path,
    destination: &Path,
    date_text: &str,
    config: &WatermarkConfig,
    face: &Typeface,
) -> bool {
    match try_render_watermark(source, destination, date_text, config, face) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(path = %source.display(), error = %e, "Failed to watermark image");
            false
        }
    }
}

/// Same as [`render_watermark`], returning the error instead of logging it.
pub fn try_render_watermark(
    source: &Path,
    destination: &Path,
    date_text: &str,
    config: &WatermarkConfig,
    face: &Typeface,
) -> Result<(), WatermarkError> {
    // 1. Decode the source
    let decoded = decode_image(source)?;
    let had_alpha = decoded.color().has_alpha();

    // 2-7. Draw and composite the text layer
    let mut canvas = decoded.into_rgba8();
    let layer = build_text_layer(canvas.width(), canvas.height(), date_text, config, face);
    alpha_composite(&mut canvas, &layer);

    // 8. Sources without alpha go back to opaque RGB
    let result = if had_alpha {
        DynamicImage::ImageRgba8(canvas)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).into_rgb8())
    };

    // 9. Encode
    save_image(&result, destination)
}

/// Render the shadow and text for `date_text` onto a transparent layer of
/// the given size.
pub fn build_text_layer(
    width: u32,
    height: u32,
    date_text: &str,
    config: &WatermarkConfig,
    face: &Typeface,
) -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));

    let font_size = config.font_size as f32;
    let bounds = measure_text(face, date_text, font_size);
    if bounds.is_empty() {
        return layer;
    }

    let image_dims = ImageDimensions { width, height };
    let origin = calculate_position(config.position, &image_dims, &bounds.dimensions(), EDGE_MARGIN);

    let shadow = Rgba([0, 0, 0, config.opacity / 2]);
    let color = config.color;
    let ink = Rgba([color.r, color.g, color.b, config.opacity]);

    draw_text(
        &mut layer,
        face,
        date_text,
        font_size,
        origin.offset(SHADOW_OFFSET, SHADOW_OFFSET),
        &bounds,
        shadow,
    );
    draw_text(&mut layer, face, date_text, font_size, origin, &bounds, ink);

    layer
}

fn decode_image(path: &Path) -> Result<DynamicImage, WatermarkError> {
    let reader = ImageReader::open(path)
        .map_err(|e| WatermarkError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| WatermarkError::io(path, e))?;

    reader.decode().map_err(|source| WatermarkError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
