//! Directory batch processing.
//!
//! Every supported image directly inside the input directory is stamped
//! with its date and written to `<dir>/<dir name>_watermark/` under its
//! original file name. Files are handled one at a time in file name order.
//! A failure on one file is logged and counted, never fatal to the run.
//!
//! # Example
//!
//! ```ignore
//! use datemark::batch::process_directory;
//!
//! let result = process_directory(Path::new("photos"), &config, &face);
//! println!("{}/{}", result.succeeded, result.total_found);
//! ```

use crate::config::WatermarkConfig;
use crate::constants::{OUTPUT_DIR_SUFFIX, SUPPORTED_EXTENSIONS};
use crate::metadata::ImageRecord;
use crate::watermark::font::Typeface;
use crate::watermark::renderer::render_watermark;
use std::io;
use std::path::{Path, PathBuf};

/// Counts accumulated over one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Supported image files discovered in the directory
    pub total_found: usize,
    /// Files written to the output directory
    pub succeeded: usize,
}

impl BatchResult {
    /// Files that were skipped or failed.
    pub fn failed(&self) -> usize {
        self.total_found - self.succeeded
    }
}

/// Output directory for `dir`: a `<name>_watermark` child of `dir` itself.
pub fn output_dir_for(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            // "." and ".." have no file name of their own
            dir.canonicalize()
                .ok()
                .and_then(|abs| abs.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default();

    dir.join(format!("{}{}", name, OUTPUT_DIR_SUFFIX))
}

/// Whether `path` carries one of the supported image extensions.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Regular files directly inside `dir` with a supported extension,
/// sorted by file name. Subdirectories are not descended into.
pub fn discover_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_supported_extension(&path) {
            images.push(path);
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Watermark every supported image in `dir`.
///
/// Directory-level problems (missing, not a directory, output directory
/// cannot be created, unreadable listing) are logged and end the run with
/// whatever counts were reached.
pub fn process_directory(dir: &Path, config: &WatermarkConfig, face: &Typeface) -> BatchResult {
    let mut result = BatchResult::default();

    // 1. Validate the input directory
    if !dir.exists() {
        tracing::error!(directory = %dir.display(), "Directory does not exist");
        return result;
    }
    if !dir.is_dir() {
        tracing::error!(directory = %dir.display(), "Path is not a directory");
        return result;
    }

    // 2. Prepare the output directory
    let output_dir = output_dir_for(dir);
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        tracing::error!(
            output_dir = %output_dir.display(),
            error = %e,
            "Failed to create output directory"
        );
        return result;
    }

    // 3. Collect candidates
    let images = match discover_images(dir) {
        Ok(images) => images,
        Err(e) => {
            tracing::error!(directory = %dir.display(), error = %e, "Failed to list directory");
            return result;
        }
    };

    if images.is_empty() {
        tracing::info!(directory = %dir.display(), "No supported image files found");
        return result;
    }

    result.total_found = images.len();
    tracing::info!(
        count = result.total_found,
        output_dir = %output_dir.display(),
        "Found {} image(s) to process",
        result.total_found
    );

    // 4. Process sequentially
    for path in images {
        let record = ImageRecord::inspect(path);
        let file_name = record.file_name();

        let Some(date) = record.inferred_date.as_deref() else {
            tracing::warn!(file = %file_name, "Skipping file, no date available");
            continue;
        };

        let destination = output_dir.join(&file_name);
        if render_watermark(&record.path, &destination, date, config, face) {
            result.succeeded += 1;
            tracing::info!(file = %file_name, date = %date, "Done: {} [{}]", file_name, date);
        } else {
            tracing::warn!(file = %file_name, "Failed: {}", file_name);
        }
    }

    // 5. Summary
    tracing::info!(
        succeeded = result.succeeded,
        total = result.total_found,
        output_dir = %output_dir.display(),
        "Processed {}/{} image(s)",
        result.succeeded,
        result.total_found
    );

    result
}
