//! Typeface selection.
//!
//! A run uses exactly one [`Typeface`], resolved once at startup from a
//! [`FontCatalog`]: an ordered list of candidate font files. The first
//! candidate that exists and parses wins. When none does, the built-in
//! bitmap face is used, so resolution itself never fails.
//!
//! # Example
//!
//! ```
//! use datemark::watermark::font::{FontCatalog, Typeface};
//!
//! let catalog = FontCatalog::new(vec!["/nonexistent/font.ttf".into()]);
//! assert!(matches!(catalog.resolve(), Typeface::Builtin));
//! ```

use super::WatermarkError;
use ab_glyph::FontVec;
use std::path::{Path, PathBuf};

/// Candidate fonts probed on Windows.
const WINDOWS_FONTS: &[&str] = &[
    "C:/Windows/Fonts/msyh.ttc",
    "C:/Windows/Fonts/arial.ttf",
    "C:/Windows/Fonts/calibri.ttf",
];

/// Candidate fonts probed on macOS.
const MACOS_FONTS: &[&str] = &[
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

/// Candidate fonts probed on Linux and other Unix systems.
const UNIX_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

/// The font used to draw watermark text.
pub enum Typeface {
    /// An outline font loaded from disk.
    Outline { font: FontVec, source: PathBuf },
    /// The built-in 5x7 bitmap face.
    Builtin,
}

impl Typeface {
    /// Human readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Outline { source, .. } => source.display().to_string(),
            Self::Builtin => "built-in bitmap face".to_string(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { source, .. } => f
                .debug_struct("Outline")
                .field("source", source)
                .finish_non_exhaustive(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

/// Ordered list of candidate font files.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    candidates: Vec<PathBuf>,
}

impl FontCatalog {
    /// Create a catalog probing exactly `candidates`, in order.
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// The candidate list for the platform this binary was built for.
    pub fn platform_default() -> Self {
        let paths = if cfg!(target_os = "windows") {
            WINDOWS_FONTS
        } else if cfg!(target_os = "macos") {
            MACOS_FONTS
        } else {
            UNIX_FONTS
        };

        Self::new(paths.iter().map(PathBuf::from).collect())
    }

    /// Put `preferred` ahead of the existing candidates, keeping their order.
    pub fn with_preferred(mut self, preferred: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut candidates: Vec<PathBuf> = preferred.into_iter().collect();
        candidates.append(&mut self.candidates);
        self.candidates = candidates;
        self
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Pick the first usable candidate, or the built-in face.
    ///
    /// Candidates that do not exist are skipped silently; candidates that
    /// exist but cannot be parsed are logged and skipped.
    pub fn resolve(&self) -> Typeface {
        for path in self.candidates.iter().filter(|p| p.is_file()) {
            match load_font_file(path) {
                Ok(font) => {
                    tracing::debug!(font = %path.display(), "Using font");
                    return Typeface::Outline {
                        font,
                        source: path.clone(),
                    };
                }
                Err(e) => {
                    tracing::warn!(font = %path.display(), error = %e, "Skipping unusable font");
                }
            }
        }

        tracing::debug!("No candidate font found, using built-in bitmap face");
        Typeface::Builtin
    }
}

/// Load a TrueType/OpenType font file. Collections use their first face.
pub fn load_font_file(path: &Path) -> Result<FontVec, WatermarkError> {
    let data = std::fs::read(path).map_err(|e| WatermarkError::io(path, e))?;

    FontVec::try_from_vec_and_index(data, 0).map_err(|e| WatermarkError::Font {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// =============================================================================
// Built-in bitmap face
// =============================================================================

/// Glyph cell width in font units.
pub(crate) const GLYPH_COLUMNS: u32 = 5;

/// Glyph cell height in font units.
pub(crate) const GLYPH_ROWS: u32 = 7;

/// Blank units between adjacent glyphs.
pub(crate) const GLYPH_SPACING: u32 = 1;

/// Rows of a 5x7 glyph, most significant of the low five bits is leftmost.
type GlyphRows = [u8; GLYPH_ROWS as usize];

const MISSING_GLYPH: GlyphRows = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

/// Bitmap for `c`. Characters outside the date alphabet render as a box.
pub(crate) fn bitmap_glyph(c: char) -> GlyphRows {
    match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        '/' => [0, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ' ' => [0; GLYPH_ROWS as usize],
        _ => MISSING_GLYPH,
    }
}

/// Size in pixels of one font unit of the bitmap face at `font_size`.
pub(crate) fn bitmap_unit(font_size: f32) -> u32 {
    ((font_size / GLYPH_ROWS as f32) as u32).max(1)
}

/// DejaVu Sans Mono shipped with the test fixtures.
#[cfg(test)]
pub(crate) fn fixture_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSansMono.ttf")
}

#[cfg(test)]
pub(crate) fn fixture_typeface() -> Typeface {
    FontCatalog::new(vec![fixture_font_path()]).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_real_font_resolves_to_outline() {
        let path = fixture_font_path();
        let face = FontCatalog::new(vec![path.clone()]).resolve();

        assert!(!face.is_builtin());
        match &face {
            Typeface::Outline { source, .. } => assert_eq!(source, &path),
            Typeface::Builtin => panic!("expected an outline face"),
        }
        assert!(face.describe().ends_with("DejaVuSansMono.ttf"));
    }

    #[test]
    fn test_first_usable_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("broken.ttf");
        std::fs::write(&bogus, b"nope").unwrap();

        let catalog = FontCatalog::new(vec![PathBuf::from("/missing/font.ttf")])
            .with_preferred(vec![bogus, fixture_font_path()]);

        match catalog.resolve() {
            Typeface::Outline { source, .. } => assert_eq!(source, fixture_font_path()),
            Typeface::Builtin => panic!("expected the fixture font"),
        }
    }

    #[test]
    fn test_load_font_file() {
        assert!(load_font_file(&fixture_font_path()).is_ok());

        let err = load_font_file(Path::new("/missing/font.ttf")).unwrap_err();
        assert!(matches!(err, WatermarkError::Io { .. }));
    }

    #[test]
    fn test_missing_candidates_resolve_to_builtin() {
        let catalog = FontCatalog::new(vec![
            PathBuf::from("/definitely/not/here.ttf"),
            PathBuf::from("/also/missing.ttc"),
        ]);
        let face = catalog.resolve();
        assert!(face.is_builtin());
        assert_eq!(face.describe(), "built-in bitmap face");
    }

    #[test]
    fn test_empty_catalog_resolves_to_builtin() {
        assert!(FontCatalog::default().resolve().is_builtin());
    }

    #[test]
    fn test_unparseable_candidate_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::File::create(&bogus)
            .unwrap()
            .write_all(b"definitely not a font")
            .unwrap();

        let catalog = FontCatalog::new(vec![bogus.clone()]);
        assert!(catalog.resolve().is_builtin());

        let err = load_font_file(&bogus).unwrap_err();
        assert!(matches!(err, WatermarkError::Font { .. }));
    }

    #[test]
    fn test_with_preferred_goes_first() {
        let catalog = FontCatalog::new(vec![PathBuf::from("b.ttf"), PathBuf::from("c.ttf")])
            .with_preferred(vec![PathBuf::from("a.ttf")]);
        let names: Vec<_> = catalog
            .candidates()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        assert_eq!(names, vec!["a.ttf", "b.ttf", "c.ttf"]);
    }

    #[test]
    fn test_platform_default_is_not_empty() {
        assert!(!FontCatalog::platform_default().candidates().is_empty());
    }

    #[test]
    fn test_date_alphabet_has_glyphs() {
        for c in "0123456789-".chars() {
            assert_ne!(bitmap_glyph(c), MISSING_GLYPH, "glyph for {:?}", c);
            assert!(bitmap_glyph(c).iter().any(|row| *row != 0));
        }
        assert_eq!(bitmap_glyph('Q'), MISSING_GLYPH);
        assert!(bitmap_glyph(' ').iter().all(|row| *row == 0));
    }

    #[test]
    fn test_glyph_rows_fit_in_columns() {
        for c in "0123456789-:/. ?".chars() {
            for row in bitmap_glyph(c) {
                assert!(u32::from(row) < (1 << GLYPH_COLUMNS));
            }
        }
    }

    #[test]
    fn test_bitmap_unit_scales_with_size() {
        assert_eq!(bitmap_unit(1.0), 1);
        assert_eq!(bitmap_unit(7.0), 1);
        assert_eq!(bitmap_unit(36.0), 5);
        assert_eq!(bitmap_unit(200.0), 28);
    }
}
