//! Alpha compositing of the text layer onto the photo.
//!
//! The text layer is always the same size as the target, so compositing is a
//! straight per-pixel Porter-Duff "over".

use image::{Rgba, RgbaImage};

/// Composite `layer` over `target` in place.
///
/// Pixels where the layer is fully transparent leave the target untouched,
/// bit for bit. Layer pixels outside the target are ignored.
pub fn alpha_composite(target: &mut RgbaImage, layer: &RgbaImage) {
    let width = target.width().min(layer.width());
    let height = target.height().min(layer.height());

    for y in 0..height {
        for x in 0..width {
            let fg = *layer.get_pixel(x, y);
            if fg[3] == 0 {
                continue;
            }

            let bg = *target.get_pixel(x, y);
            target.put_pixel(x, y, blend_pixels(bg, fg));
        }
    }
}

/// Blend two pixels using the "over" operator:
/// result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    if foreground[3] == 255 {
        return foreground;
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
