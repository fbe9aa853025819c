// Shared fixtures for integration tests

use chrono::{Local, TimeZone};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Write a metadata-less image in the format implied by `name`.
pub fn write_photo(dir: &Path, name: &str, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    let image = RgbImage::from_fn(320, 240, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 160]));
    DynamicImage::ImageRgb8(image)
        .save_with_format(&path, format)
        .unwrap();
    path
}

/// Set the modification time of `path` to noon local time on the given day.
pub fn set_mtime(path: &Path, year: i32, month: u32, day: u32) {
    let when = Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(when.into())
        .unwrap();
}

/// `<dir>/<dir name>_watermark`
pub fn expected_output_dir(dir: &Path) -> PathBuf {
    let name = dir.file_name().unwrap().to_string_lossy().into_owned();
    dir.join(format!("{}_watermark", name))
}

/// DejaVu Sans Mono shipped under `tests/fixtures/fonts`.
pub fn fixture_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSansMono.ttf")
}
