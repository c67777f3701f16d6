use std::path::PathBuf;

/// Errors that abort a card composition.
///
/// Anything not listed here degrades to a different but valid card.
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    #[error("Uploaded photo could not be decoded: {0}")]
    Decode(String),

    #[error("Frame template not available at {path}: {reason}")]
    MissingTemplate { path: PathBuf, reason: String },

    #[error(
        "Photo slot ({x}, {y}) side {side} does not fit in a {width}x{height} frame template"
    )]
    InvalidTemplate {
        x: u32,
        y: u32,
        side: u32,
        width: u32,
        height: u32,
    },

    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),
}

impl From<image::ImageError> for CompositionError {
    fn from(e: image::ImageError) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Errors loading an optional asset (corner decoration, sticker).
///
/// Callers recover by skipping the layer or falling back to text.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    Missing(PathBuf),

    #[error("Asset {path} could not be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
