//! Message catalog and sticker-or-text resolution.
//!
//! A selected message maps to a pre-rendered sticker when its asset is
//! present; otherwise the message text itself is drawn on the card.

use image::RgbaImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::assets::AssetStore;
use crate::compose::{MESSAGE_ANCHOR, clip_to_canvas};

/// Selection-list entry meaning "no message chosen".
pub const PLACEHOLDER: &str = "↓Message↓";

/// Identifier of a sticker asset (file stem in the asset store).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StickerId(String);

impl StickerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub text: String,
    pub sticker: Option<StickerId>,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

/// Fixed set of messages grouped by category, in display order.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    categories: Vec<Category>,
}

const DEFAULT_CATALOG: &[(&str, &[(&str, &str)])] = &[
    (
        "Feeling",
        &[
            ("THANK YOU", "PIC_1_1"),
            ("NICE !", "PIC_1_2"),
            ("Good !", "PIC_1_3"),
        ],
    ),
    (
        "Food",
        &[
            ("Delicious!", "PIC_2_1"),
            ("Super yummy!", "PIC_2_2"),
            ("So tasty!", "PIC_2_3"),
        ],
    ),
    (
        "Service",
        &[
            ("BEST FRIENDLY!", "PIC_3_1"),
            ("Great staff", "PIC_3_2"),
            ("LOVED THE SERVICES", "PIC_3_3"),
        ],
    ),
    (
        "Atmosphere",
        &[
            ("Cozy vibes!", "PIC_4_1"),
            ("So relaxing.", "PIC_4_2"),
            ("Cool spot.", "PIC_4_3"),
        ],
    ),
];

impl Default for MessageCatalog {
    fn default() -> Self {
        let categories = DEFAULT_CATALOG
            .iter()
            .map(|(name, entries)| Category {
                name: (*name).to_string(),
                entries: entries
                    .iter()
                    .map(|(text, sticker)| CatalogEntry {
                        text: (*text).to_string(),
                        sticker: Some(StickerId::new(*sticker)),
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }
}

impl MessageCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn lookup(&self, message: &str) -> Option<&CatalogEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .find(|e| e.text == message)
    }

    /// Every message, flattened in display order.
    pub fn all_messages(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .map(|e| e.text.as_str())
    }

    /// Selection list: the placeholder followed by every message.
    pub fn options(&self) -> Vec<&str> {
        std::iter::once(PLACEHOLDER)
            .chain(self.all_messages())
            .collect()
    }
}

/// What to draw in the message slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLayer {
    None,
    Sticker { asset_id: StickerId },
    Text { content: String },
}

/// Resolves a selected message against the catalog and the asset store.
#[derive(Debug, Clone)]
pub struct MessageResolver {
    catalog: MessageCatalog,
    store: AssetStore,
}

impl MessageResolver {
    pub fn new(catalog: MessageCatalog, store: AssetStore) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn resolve(&self, selected: Option<&str>) -> MessageLayer {
        let Some(message) = selected.filter(|m| *m != PLACEHOLDER) else {
            return MessageLayer::None;
        };

        let sticker = self
            .catalog
            .lookup(message)
            .and_then(|entry| entry.sticker.as_ref());

        match sticker {
            Some(id) if self.store.has_sticker(id) => MessageLayer::Sticker {
                asset_id: id.clone(),
            },
            Some(id) => {
                debug!(message, sticker = id.as_str(), "Sticker asset missing, using text");
                MessageLayer::Text {
                    content: message.to_string(),
                }
            }
            None => MessageLayer::Text {
                content: message.to_string(),
            },
        }
    }
}

/// Shrink a sticker so it fits the canvas from [`MESSAGE_ANCHOR`].
///
/// Width and height are truncated independently, so an overflowing sticker
/// may lose its aspect ratio.
pub fn fit_sticker(sticker: &RgbaImage, canvas: (u32, u32)) -> RgbaImage {
    let (w, h) = clip_to_canvas(sticker.width(), sticker.height(), MESSAGE_ANCHOR, canvas);
    if (w, h) == sticker.dimensions() || w == 0 || h == 0 {
        return sticker.clone();
    }
    debug!(
        orig_w = sticker.width(),
        orig_h = sticker.height(),
        w,
        h,
        "Shrinking sticker to canvas"
    );
    image::imageops::resize(sticker, w, h, FilterType::Triangle)
}
