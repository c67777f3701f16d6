//! Text measuring and drawing on the card canvas.

use ab_glyph::{FontVec, PxScale};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::font::FontChoice;

/// Default font size in pixels for outline fonts.
pub const MESSAGE_FONT_SIZE: f32 = 16.0;

/// Glyph cell size of the built-in bitmap font.
const BUILTIN_CELL: u32 = 8;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Font used for the message fallback and the date stamp.
pub enum CardFont {
    Outline { font: FontVec, scale: PxScale },
    Builtin,
}

impl std::fmt::Debug for CardFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { scale, .. } => f.debug_struct("Outline").field("scale", scale).finish(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

impl CardFont {
    pub fn from_choice(choice: FontChoice, size: f32) -> Self {
        match choice {
            FontChoice::Loaded { font, .. } => Self::Outline {
                font,
                scale: PxScale::from(size),
            },
            FontChoice::UseDefault => Self::Builtin,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Pixel width and height of `text`'s bounding box.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            Self::Outline { font, scale } => text_size(*scale, font, text),
            Self::Builtin => {
                let chars = text.chars().count() as u32;
                if chars == 0 {
                    (0, 0)
                } else {
                    (chars * BUILTIN_CELL, BUILTIN_CELL)
                }
            }
        }
    }

    /// Draw `text` with its top-left at (`x`, `y`). Pixels off the canvas are dropped.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        match self {
            Self::Outline { font, scale } => draw_text_mut(canvas, color, x, y, *scale, font, text),
            Self::Builtin => draw_bitmap_text(canvas, x, y, text, color),
        }
    }
}

fn draw_bitmap_text(canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    for (i, c) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let origin_x = i64::from(x) + i as i64 * i64::from(BUILTIN_CELL);
        for (row, bits) in glyph.iter().enumerate() {
            let py = i64::from(y) + row as i64;
            if py < 0 || py >= ch {
                continue;
            }
            for col in 0..BUILTIN_CELL {
                // bit 0 is the leftmost pixel
                if bits & (1u8 << col) == 0 {
                    continue;
                }
                let px = origin_x + i64::from(col);
                if px >= 0 && px < cw {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}
