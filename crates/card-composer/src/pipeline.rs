//! End-to-end card pipeline: decode, fit, compose, stamp, encode.

use std::io::Cursor;
use std::path::PathBuf;

use chrono::NaiveDate;
use image::{ImageFormat, RgbaImage};
use tracing::{debug, info, warn};

use crate::assets::{AssetStore, FrameTemplate, PhotoSlot};
use crate::compose::{self, MESSAGE_ANCHOR};
use crate::error::{AssetError, CompositionError};
use crate::fit::fit_and_crop;
use crate::font::{self, FontChoice};
use crate::message::{self, MessageCatalog, MessageLayer, MessageResolver};
use crate::stamp::stamp_date;
use crate::text::{BLACK, CardFont, MESSAGE_FONT_SIZE};
use crate::CARD_CAPTION;

/// Where the assets live and how the frame is laid out.
#[derive(Debug, Clone)]
pub struct CardConfig {
    pub asset_dir: PathBuf,
    pub slot: PhotoSlot,
    /// Tried before the system fonts.
    pub font_paths: Vec<PathBuf>,
    pub font_size: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            slot: PhotoSlot::default(),
            font_paths: Vec::new(),
            font_size: MESSAGE_FONT_SIZE,
        }
    }
}

/// One user interaction: the uploaded photo and the selected message.
#[derive(Debug, Clone, Default)]
pub struct CompositionRequest {
    pub photo: Vec<u8>,
    pub message: Option<String>,
}

impl CompositionRequest {
    pub fn new(photo: Vec<u8>, message: Option<String>) -> Self {
        Self { photo, message }
    }
}

/// The finished card.
#[derive(Debug, Clone)]
pub struct CompositionResult {
    pub image: RgbaImage,
    pub png: Vec<u8>,
    pub caption: String,
}

/// Immutable composition context shared by every request.
#[derive(Debug)]
pub struct CardComposer {
    store: AssetStore,
    template: FrameTemplate,
    corner: Option<RgbaImage>,
    resolver: MessageResolver,
    font: CardFont,
}

impl CardComposer {
    /// Load the template, corner decoration and font.
    ///
    /// Only a missing or unusable template is an error.
    pub fn load(config: &CardConfig) -> Result<Self, CompositionError> {
        Self::with_catalog(config, MessageCatalog::default())
    }

    pub fn with_catalog(
        config: &CardConfig,
        catalog: MessageCatalog,
    ) -> Result<Self, CompositionError> {
        let store = AssetStore::new(&config.asset_dir);
        let template = store.load_template(config.slot)?;

        let corner = match store.load_corner() {
            Ok(img) => Some(img),
            Err(AssetError::Missing(path)) => {
                info!(path = %path.display(), "No corner decoration, skipping layer");
                None
            }
            Err(e) => {
                warn!("Corner decoration unusable, skipping layer: {e}");
                None
            }
        };

        let choice = font::load_font(&font::font_candidates(&config.font_paths));
        if let FontChoice::Loaded { path, .. } = &choice {
            debug!(path = %path.display(), "Card font selected");
        }
        let font = CardFont::from_choice(choice, config.font_size);

        Ok(Self {
            resolver: MessageResolver::new(catalog, store.clone()),
            store,
            template,
            corner,
            font,
        })
    }

    /// Assemble a composer from already-loaded parts.
    pub fn from_parts(
        store: AssetStore,
        template: FrameTemplate,
        corner: Option<RgbaImage>,
        catalog: MessageCatalog,
        font: CardFont,
    ) -> Self {
        Self {
            resolver: MessageResolver::new(catalog, store.clone()),
            store,
            template,
            corner,
            font,
        }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        self.resolver.catalog()
    }

    pub fn template(&self) -> &FrameTemplate {
        &self.template
    }

    pub fn resolve(&self, selected: Option<&str>) -> MessageLayer {
        self.resolver.resolve(selected)
    }

    /// Compose a card stamped with today's local date.
    pub fn compose(
        &self,
        request: &CompositionRequest,
    ) -> Result<CompositionResult, CompositionError> {
        self.compose_on(request, chrono::Local::now().date_naive())
    }

    /// Compose a card stamped with `date`. Identical inputs give identical bytes.
    pub fn compose_on(
        &self,
        request: &CompositionRequest,
        date: NaiveDate,
    ) -> Result<CompositionResult, CompositionError> {
        let image = self.render(request, date)?;

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(CompositionError::Encode)?;

        Ok(CompositionResult {
            image,
            png,
            caption: CARD_CAPTION.to_string(),
        })
    }

    /// Build the card raster without encoding it.
    pub fn render(
        &self,
        request: &CompositionRequest,
        date: NaiveDate,
    ) -> Result<RgbaImage, CompositionError> {
        let photo = image::load_from_memory(&request.photo)?;
        let cropped = fit_and_crop(&photo, self.template.slot().side)?;

        let layer = self.resolver.resolve(request.message.as_deref());
        let (sticker, text) = match &layer {
            MessageLayer::None => (None, None),
            MessageLayer::Sticker { asset_id } => match self.store.load_sticker(asset_id) {
                Ok(img) => {
                    let canvas = (self.template.width(), self.template.height());
                    (Some(message::fit_sticker(&img, canvas)), None)
                }
                Err(e) => {
                    warn!("Sticker unusable, drawing message as text: {e}");
                    (None, request.message.as_deref())
                }
            },
            MessageLayer::Text { content } => (None, Some(content.as_str())),
        };

        let mut canvas = compose::compose(
            &self.template,
            &cropped,
            self.corner.as_ref(),
            sticker.as_ref(),
        );

        if let Some(text) = text {
            let (x, y) = MESSAGE_ANCHOR;
            self.font.draw(&mut canvas, x as i32, y as i32, text, BLACK);
        }

        stamp_date(&mut canvas, date, &self.font);

        info!(
            width = canvas.width(),
            height = canvas.height(),
            layer = layer_kind(&layer),
            "Composed card"
        );
        Ok(canvas)
    }
}

fn layer_kind(layer: &MessageLayer) -> &'static str {
    match layer {
        MessageLayer::None => "none",
        MessageLayer::Sticker { .. } => "sticker",
        MessageLayer::Text { .. } => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn composer() -> CardComposer {
        let template = FrameTemplate::new(
            RgbaImage::from_pixel(420, 500, Rgba([250, 250, 245, 255])),
            PhotoSlot::default(),
        )
        .unwrap();
        CardComposer::from_parts(
            AssetStore::new("/nonexistent/card-assets"),
            template,
            None,
            MessageCatalog::default(),
            CardFont::Builtin,
        )
    }

    fn png_photo(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([20, 120, 200, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn result_has_template_dimensions() {
        let c = composer();
        for (w, h) in [(800, 400), (400, 800), (346, 346), (3, 2)] {
            let req = CompositionRequest::new(png_photo(w, h), None);
            let out = c.compose_on(&req, day()).unwrap();
            assert_eq!(out.image.dimensions(), (420, 500));
        }
    }

    #[test]
    fn undecodable_photo_is_decode_error() {
        let c = composer();
        let req = CompositionRequest::new(b"GIF? no".to_vec(), None);
        let err = c.compose_on(&req, day()).unwrap_err();
        assert!(matches!(err, CompositionError::Decode(_)));
    }

    #[test]
    fn caption_is_set() {
        let c = composer();
        let out = c
            .compose_on(&CompositionRequest::new(png_photo(10, 10), None), day())
            .unwrap();
        assert_eq!(out.caption, CARD_CAPTION);
    }

    #[test]
    fn missing_sticker_draws_text_at_anchor() {
        let c = composer();
        let plain = c
            .render(&CompositionRequest::new(png_photo(10, 10), None), day())
            .unwrap();
        let with_text = c
            .render(
                &CompositionRequest::new(png_photo(10, 10), Some("THANK YOU".into())),
                day(),
            )
            .unwrap();
        assert_ne!(plain, with_text);
        // glyphs fall on the photo area starting at the anchor row
        let differs = (80..88)
            .any(|y| (10..90).any(|x| plain.get_pixel(x, y) != with_text.get_pixel(x, y)));
        assert!(differs);
    }
}
