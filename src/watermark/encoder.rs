//! Output encoding.
//!
//! The output format follows the destination file's extension. Each format
//! has its own encoder behind the [`ImageEncoder`] trait:
//!
//! - JPEG at quality 95
//! - PNG with best compression and adaptive filtering
//! - TIFF with the codec defaults
//!
//! Encoders keep the color type they are given, except JPEG which has no
//! alpha channel and always writes RGB.

use super::WatermarkError;
use crate::constants::JPEG_QUALITY;
use image::{ColorType, DynamicImage};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Tiff,
}

impl OutputFormat {
    /// Pick the format from a file extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Short lowercase name for logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Tiff => "tiff",
        }
    }
}

/// Trait for image encoders.
pub trait ImageEncoder {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Encode an RGB8 or RGBA8 image to bytes.
    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, image::ImageError>;

    /// Check if this encoder supports transparency
    fn supports_transparency(&self) -> bool;
}

/// JPEG encoder using the image crate
pub struct JpegEncoder {
    pub quality: u8,
}

impl Default for JpegEncoder {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
        }
    }
}

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
        use image::ImageEncoder as _;

        // JPEG doesn't support alpha
        let rgb = image.to_rgb8();

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageJpegEncoder::new_with_quality(&mut output, self.quality);
        encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;

        Ok(output.into_inner())
    }

    fn supports_transparency(&self) -> bool {
        false
    }
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
        use image::codecs::png::{CompressionType, FilterType, PngEncoder as ImagePngEncoder};
        use image::ImageEncoder as _;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImagePngEncoder::new_with_quality(
            &mut output,
            CompressionType::Best,
            FilterType::Adaptive,
        );
        encoder.write_image(image.as_bytes(), image.width(), image.height(), image.color())?;

        Ok(output.into_inner())
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

/// TIFF encoder using the image crate
pub struct TiffEncoder;

impl ImageEncoder for TiffEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Tiff
    }

    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
        use image::codecs::tiff::TiffEncoder as ImageTiffEncoder;
        use image::ImageEncoder as _;

        let mut output = Cursor::new(Vec::new());
        let encoder = ImageTiffEncoder::new(&mut output);
        encoder.write_image(image.as_bytes(), image.width(), image.height(), image.color())?;

        Ok(output.into_inner())
    }

    fn supports_transparency(&self) -> bool {
        true
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder::default()),
            OutputFormat::Png => Box::new(PngEncoder),
            OutputFormat::Tiff => Box::new(TiffEncoder),
        }
    }
}

/// Encode `image` in the format implied by `path` and write it there.
///
/// Images with alpha are flattened to RGB for formats that cannot store it.
/// An existing file at `path` is overwritten.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<(), WatermarkError> {
    let format = OutputFormat::from_path(path).ok_or_else(|| WatermarkError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let encoder = EncoderFactory::create(format);

    let flattened;
    let image = if image.color().has_alpha() && !encoder.supports_transparency() {
        flattened = DynamicImage::ImageRgb8(image.to_rgb8());
        &flattened
    } else {
        image
    };

    let data = encoder.encode(image).map_err(|e| {
        WatermarkError::encode(path, format!("{}: {}", encoder.format().as_str(), e))
    })?;

    let file = std::fs::File::create(path).map_err(|e| WatermarkError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&data)
        .and_then(|_| writer.flush())
        .map_err(|e| WatermarkError::io(path, e))?;

    Ok(())
}
