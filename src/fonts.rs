//! Font discovery for the PDF export path.
//!
//! The export layer needs a full regular/bold/italic/bold-italic family.
//! Fonts are looked up first via the `FLEET_REPORT_FONTS_DIR` environment
//! variable, then under the crate's bundled `assets/fonts` directory.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};

/// Name of the expected font family.
pub const FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable overriding the font directory.
pub const FONTS_DIR_ENV_VAR: &str = "FLEET_REPORT_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

fn candidate_directories() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(dir) = env::var(FONTS_DIR_ENV_VAR) {
        if !dir.trim().is_empty() {
            candidates.push(PathBuf::from(dir));
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"));
    candidates
}

fn directory_has_all_fonts(directory: &Path) -> bool {
    FONT_FILES
        .iter()
        .all(|name| directory.join(name).is_file())
}

/// Loads the report font family from the first complete candidate directory.
pub fn report_font_family() -> Result<FontFamily<FontData>, Error> {
    let candidates = candidate_directories();
    let directory = candidates
        .iter()
        .find(|directory| directory_has_all_fonts(directory))
        .ok_or_else(|| {
            let searched = candidates
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Error::new(
                format!(
                    "No complete {FONT_FAMILY_NAME} font family found (searched: {searched}). \
                     See assets/fonts/README.md or set {FONTS_DIR_ENV_VAR}."
                ),
                io::Error::new(io::ErrorKind::NotFound, "report fonts not found"),
            )
        })?;

    fonts::from_files(directory, FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::InvalidData, err.to_string()),
        )
    })
}

/// Indicates whether a complete font family is available without loading it.
/// Rendering tests use this to skip when the fonts are not installed.
pub fn fonts_available() -> bool {
    candidate_directories()
        .iter()
        .any(|directory| directory_has_all_fonts(directory))
}
