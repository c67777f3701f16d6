//! Font discovery for card text.
//!
//! Tries configured and system font files in order. When none of them
//! parses, the caller is told to use the built-in bitmap font.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use tracing::{debug, info};

/// Outcome of a font lookup.
pub enum FontChoice {
    Loaded { font: FontVec, path: PathBuf },
    UseDefault,
}

impl std::fmt::Debug for FontChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded { path, .. } => f.debug_struct("Loaded").field("path", path).finish(),
            Self::UseDefault => f.write_str("UseDefault"),
        }
    }
}

/// Load the first usable font among `candidates`.
pub fn load_font(candidates: &[PathBuf]) -> FontChoice {
    for path in candidates {
        if let Some(font) = try_load(path) {
            info!(path = %path.display(), "Using font for card text");
            return FontChoice::Loaded {
                font,
                path: path.clone(),
            };
        }
    }
    info!("No usable font file found, using built-in bitmap font");
    FontChoice::UseDefault
}

fn try_load(path: &Path) -> Option<FontVec> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            debug!(path = %path.display(), "Font candidate unreadable: {e}");
            return None;
        }
    };
    match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
            debug!(path = %path.display(), "Font candidate failed to parse: {e}");
            None
        }
    }
}

/// Configured font paths first, then the platform's common system fonts.
pub fn font_candidates(configured: &[PathBuf]) -> Vec<PathBuf> {
    configured
        .iter()
        .cloned()
        .chain(system_font_candidates().iter().map(PathBuf::from))
        .collect()
}

pub fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
        ]
    }
}
