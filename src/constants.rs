// Constants module - centralized default values and limits
//
// Every default the CLI exposes and every fixed number the watermark
// pipeline relies on lives here, so the renderer and the CLI agree.

// =============================================================================
// CLI defaults
// =============================================================================

/// Default font size in pixels
pub const DEFAULT_FONT_SIZE: i64 = 36;

/// Default text color (any form accepted by `parse_color`)
pub const DEFAULT_COLOR: &str = "white";

/// Default text opacity (0 = invisible, 255 = opaque)
pub const DEFAULT_OPACITY: i64 = 200;

// =============================================================================
// Validation limits
// =============================================================================

/// Smallest accepted font size
pub const MIN_FONT_SIZE: i64 = 1;

/// Largest accepted font size
pub const MAX_FONT_SIZE: i64 = 200;

/// Smallest accepted opacity
pub const MIN_OPACITY: i64 = 0;

/// Largest accepted opacity
pub const MAX_OPACITY: i64 = 255;

// =============================================================================
// Rendering
// =============================================================================

/// Distance in pixels between the text and any edge its anchor touches
pub const EDGE_MARGIN: u32 = 20;

/// Drop shadow offset in pixels, applied to both axes
pub const SHADOW_OFFSET: i32 = 2;

/// JPEG encoding quality (0-100)
pub const JPEG_QUALITY: u8 = 95;

// =============================================================================
// Batch processing
// =============================================================================

/// Suffix appended to the input directory name to form the output directory
pub const OUTPUT_DIR_SUFFIX: &str = "_watermark";

/// File extensions (lower-case, without the dot) picked up by the batch
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif"];
