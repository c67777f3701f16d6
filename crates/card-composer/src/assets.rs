//! Read-only asset store: frame template, corner decoration, stickers.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, info};

use crate::error::{AssetError, CompositionError};
use crate::message::StickerId;
use crate::{PHOTO_OFFSET, PHOTO_SIDE};

/// File name of the frame template.
pub const TEMPLATE_FILE: &str = "polaframe.png";

/// File name of the corner decoration.
pub const CORNER_FILE: &str = "PIC_5_1.png";

/// Square region of the template the photo is pasted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoSlot {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

impl Default for PhotoSlot {
    fn default() -> Self {
        Self {
            x: PHOTO_OFFSET.0,
            y: PHOTO_OFFSET.1,
            side: PHOTO_SIDE,
        }
    }
}

/// The frame background together with its photo slot geometry.
#[derive(Debug, Clone)]
pub struct FrameTemplate {
    image: RgbaImage,
    slot: PhotoSlot,
}

impl FrameTemplate {
    /// Pair a template image with its slot, rejecting slots that leave the canvas.
    pub fn new(image: RgbaImage, slot: PhotoSlot) -> Result<Self, CompositionError> {
        let (width, height) = image.dimensions();
        let fits_x = slot.x.checked_add(slot.side).is_some_and(|r| r <= width);
        let fits_y = slot.y.checked_add(slot.side).is_some_and(|b| b <= height);
        if slot.side == 0 || !fits_x || !fits_y {
            return Err(CompositionError::InvalidTemplate {
                x: slot.x,
                y: slot.y,
                side: slot.side,
                width,
                height,
            });
        }
        Ok(Self { image, slot })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn slot(&self) -> PhotoSlot {
        self.slot
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// A directory of named PNG assets.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(TEMPLATE_FILE)
    }

    pub fn corner_path(&self) -> PathBuf {
        self.root.join(CORNER_FILE)
    }

    pub fn sticker_path(&self, id: &StickerId) -> PathBuf {
        self.root.join(format!("{}.png", id.as_str()))
    }

    pub fn has_sticker(&self, id: &StickerId) -> bool {
        self.sticker_path(id).is_file()
    }

    /// Load the frame template. Failure here aborts every composition.
    pub fn load_template(&self, slot: PhotoSlot) -> Result<FrameTemplate, CompositionError> {
        let path = self.template_path();
        let image = load_rgba(&path).map_err(|e| CompositionError::MissingTemplate {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Loaded frame template"
        );
        FrameTemplate::new(image, slot)
    }

    /// Load the corner decoration, if present.
    pub fn load_corner(&self) -> Result<RgbaImage, AssetError> {
        load_rgba(&self.corner_path())
    }

    pub fn load_sticker(&self, id: &StickerId) -> Result<RgbaImage, AssetError> {
        load_rgba(&self.sticker_path(id))
    }
}

fn load_rgba(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), w = img.width(), h = img.height(), "Loaded asset");
    Ok(img.to_rgba8())
}
