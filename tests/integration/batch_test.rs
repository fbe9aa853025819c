// Batch processing over real directories

use super::test_harness::{expected_output_dir, fixture_font_path, set_mtime, write_photo};
use datemark::batch::{process_directory, BatchResult};
use datemark::config::WatermarkConfig;
use datemark::metadata::capture_date;
use datemark::watermark::color::parse_color;
use datemark::watermark::font::{FontCatalog, Typeface};
use datemark::watermark::position::Anchor;
use image::ImageFormat;

fn default_config() -> WatermarkConfig {
    WatermarkConfig::new(36, parse_color("white"), Anchor::BottomRight, 200).unwrap()
}

#[test]
fn test_single_jpeg_without_metadata_uses_mtime() {
    let dir = tempfile::tempdir().unwrap();
    let photo = write_photo(dir.path(), "holiday.jpg", ImageFormat::Jpeg);
    set_mtime(&photo, 2024, 1, 2);

    assert_eq!(capture_date(&photo).as_deref(), Some("2024-01-02"));

    let result = process_directory(dir.path(), &default_config(), &Typeface::Builtin);

    assert_eq!(
        result,
        BatchResult {
            total_found: 1,
            succeeded: 1
        }
    );
    let output = expected_output_dir(dir.path()).join("holiday.jpg");
    assert!(output.is_file());

    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 240));
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().unwrap();

    let result = process_directory(dir.path(), &default_config(), &Typeface::Builtin);

    assert_eq!(result, BatchResult::default());
    let output_dir = expected_output_dir(dir.path());
    assert!(output_dir.is_dir());
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 0);
}

#[test]
fn test_mixed_formats_and_unsupported_files() {
    let dir = tempfile::tempdir().unwrap();
    write_photo(dir.path(), "a.PNG", ImageFormat::Png);
    write_photo(dir.path(), "b.jpeg", ImageFormat::Jpeg);
    write_photo(dir.path(), "c.tif", ImageFormat::Tiff);
    std::fs::write(dir.path().join("readme.txt"), b"not a photo").unwrap();

    let config = WatermarkConfig::new(18, parse_color("#FF8800"), Anchor::TopLeft, 255).unwrap();
    let result = process_directory(dir.path(), &config, &Typeface::Builtin);

    assert_eq!(result.total_found, 3);
    assert_eq!(result.succeeded, 3);

    let output_dir = expected_output_dir(dir.path());
    for name in ["a.PNG", "b.jpeg", "c.tif"] {
        assert!(output_dir.join(name).is_file(), "missing output for {}", name);
    }
    assert!(!output_dir.join("readme.txt").exists());
}

#[test]
fn test_originals_are_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let photo = write_photo(dir.path(), "keep.png", ImageFormat::Png);
    let before = std::fs::read(&photo).unwrap();

    process_directory(dir.path(), &default_config(), &Typeface::Builtin);

    assert_eq!(std::fs::read(&photo).unwrap(), before);
    let stamped = std::fs::read(expected_output_dir(dir.path()).join("keep.png")).unwrap();
    assert_ne!(stamped, before);
}

#[test]
fn test_batch_with_outline_font() {
    let dir = tempfile::tempdir().unwrap();
    write_photo(dir.path(), "one.jpg", ImageFormat::Jpeg);
    write_photo(dir.path(), "two.png", ImageFormat::Png);

    let face = FontCatalog::platform_default()
        .with_preferred(vec![fixture_font_path()])
        .resolve();
    assert!(!face.is_builtin());

    let result = process_directory(dir.path(), &default_config(), &face);

    assert_eq!(result, BatchResult { total_found: 2, succeeded: 2 });
    let output_dir = expected_output_dir(dir.path());
    assert!(output_dir.join("one.jpg").is_file());
    assert!(output_dir.join("two.png").is_file());
}
