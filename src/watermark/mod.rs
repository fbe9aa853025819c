//! Date watermark rendering.
//!
//! Turns a date string into a shadowed text layer and composites it onto a
//! photo:
//!
//! - [`color`] parses user color strings
//! - [`position`] resolves an anchor to the text's top-left corner
//! - [`font`] picks an outline font or the built-in bitmap face
//! - [`text_renderer`] measures and rasterizes text
//! - [`compositor`] blends the layer onto the photo
//! - [`encoder`] writes JPEG, PNG or TIFF by extension
//! - [`renderer`] runs the whole pipeline for one file

pub mod color;
pub mod compositor;
pub mod encoder;
pub mod error;
pub mod font;
pub mod position;
pub mod renderer;
pub mod text_renderer;

pub use color::{parse_color, parse_hex_color, Color};
pub use error::WatermarkError;
pub use font::{FontCatalog, Typeface};
pub use position::{calculate_position, Anchor, ImageDimensions, PlacementPosition, TextDimensions};
pub use renderer::{render_watermark, try_render_watermark};
