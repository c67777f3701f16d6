//! Polaroid card composition.
//!
//! Fits an uploaded photo into the fixed frame template, overlays an
//! optional message sticker (or its text fallback), stamps the date,
//! and encodes the result as PNG.

pub mod assets;
pub mod compose;
pub mod error;
pub mod fit;
pub mod font;
pub mod message;
pub mod pipeline;
pub mod stamp;
pub mod text;

// Re-exports for convenience
pub use assets::{AssetStore, FrameTemplate, PhotoSlot};
pub use error::{AssetError, CompositionError};
pub use fit::fit_and_crop;
pub use message::{MessageCatalog, MessageLayer, MessageResolver, StickerId};
pub use pipeline::{CardComposer, CardConfig, CompositionRequest, CompositionResult};
pub use stamp::{format_stamp, stamp_date};
pub use text::CardFont;

/// Side length of the square photo slot in the reference frame.
pub const PHOTO_SIDE: u32 = 346;

/// Top-left offset of the photo slot in the reference frame.
pub const PHOTO_OFFSET: (u32, u32) = (37, 37);

/// Caption shown next to the card preview.
pub const CARD_CAPTION: &str = "Your Polaroid Card";

/// File name suggested for the downloaded card.
pub const CARD_FILE_NAME: &str = "polaroid_card.png";
