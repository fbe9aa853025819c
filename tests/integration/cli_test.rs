// Command-line behavior of the datemark binary

use super::test_harness::{expected_output_dir, fixture_font_path, set_mtime, write_photo};
use image::ImageFormat;
use std::process::Command;

fn datemark() -> Command {
    Command::new(env!("CARGO_BIN_EXE_datemark"))
}

#[test]
fn test_default_run_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let photo = write_photo(dir.path(), "photo.jpg", ImageFormat::Jpeg);
    set_mtime(&photo, 2024, 1, 2);

    let output = datemark().arg(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(expected_output_dir(dir.path()).join("photo.jpg").is_file());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2024-01-02"), "stdout: {}", stdout);
}

#[test]
fn test_opacity_out_of_range_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    write_photo(dir.path(), "photo.jpg", ImageFormat::Jpeg);

    let output = datemark()
        .arg(dir.path())
        .args(["--opacity", "300"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!expected_output_dir(dir.path()).exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Opacity must be between 0 and 255"), "stdout: {}", stdout);
}

#[test]
fn test_range_error_is_reported_before_color_parsing() {
    let dir = tempfile::tempdir().unwrap();

    let output = datemark()
        .arg(dir.path())
        .args(["--opacity", "300", "--color", "bogus"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Opacity must be between 0 and 255"), "stdout: {}", stdout);
    assert!(!stdout.contains("Could not parse color"), "stdout: {}", stdout);
}

#[test]
fn test_font_flag_uses_outline_font() {
    let dir = tempfile::tempdir().unwrap();
    write_photo(dir.path(), "photo.png", ImageFormat::Png);

    let output = datemark()
        .arg(dir.path())
        .args(["--font", fixture_font_path().to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DejaVuSansMono.ttf"), "stdout: {}", stdout);
    assert!(expected_output_dir(dir.path()).join("photo.png").is_file());
}

#[test]
fn test_font_size_out_of_range_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    for size in ["0", "201", "-5"] {
        let output = datemark().arg(dir.path()).args(["-s", size]).output().unwrap();
        assert_eq!(output.status.code(), Some(1), "size {}", size);
    }
    assert!(!expected_output_dir(dir.path()).exists());
}

#[test]
fn test_invalid_position_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let output = datemark()
        .arg(dir.path())
        .args(["--position", "middle"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!expected_output_dir(dir.path()).exists());
}

#[test]
fn test_unknown_color_falls_back_and_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    write_photo(dir.path(), "photo.png", ImageFormat::Png);

    let output = datemark()
        .arg(dir.path())
        .args(["--color", "chartreuse", "-p", "center"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(expected_output_dir(dir.path()).join("photo.png").is_file());
}

#[test]
fn test_missing_directory_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere");

    let output = datemark().arg(&missing).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(!missing.exists());
}

#[test]
fn test_missing_directory_argument_exits_one() {
    let output = datemark().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_and_version_exit_zero() {
    let help = datemark().arg("--help").output().unwrap();
    assert_eq!(help.status.code(), Some(0));
    let text = String::from_utf8_lossy(&help.stdout);
    assert!(text.contains("bottom-right"));
    assert!(text.contains("#RRGGBB"));

    let version = datemark().arg("--version").output().unwrap();
    assert_eq!(version.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&version.stdout).contains(env!("CARGO_PKG_VERSION")));
}
