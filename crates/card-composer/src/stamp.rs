//! Date stamp in the bottom-right corner of the card.

use chrono::NaiveDate;
use image::RgbaImage;
use tracing::debug;

use crate::text::{BLACK, CardFont};

/// Distance from the right edge of the card to the end of the date text.
pub const DATE_RIGHT_MARGIN: i64 = 30;

/// Distance from the bottom edge of the card to the bottom of the date text.
pub const DATE_BOTTOM_MARGIN: i64 = 40;

/// Format a date as `on Mar 05, 2024`.
pub fn format_stamp(date: NaiveDate) -> String {
    date.format("on %b %d, %Y").to_string()
}

/// Top-left position of a `text_size` box anchored to the bottom-right margins.
pub fn stamp_origin(canvas: (u32, u32), text_size: (u32, u32)) -> (i64, i64) {
    let x = i64::from(canvas.0) - i64::from(text_size.0) - DATE_RIGHT_MARGIN;
    let y = i64::from(canvas.1) - i64::from(text_size.1) - DATE_BOTTOM_MARGIN;
    (x, y)
}

/// Draw the date onto `canvas` in solid black.
pub fn stamp_date(canvas: &mut RgbaImage, date: NaiveDate, font: &CardFont) {
    let text = format_stamp(date);
    let size = font.measure(&text);
    let (x, y) = stamp_origin(canvas.dimensions(), size);
    debug!(%text, x, y, "Stamping date");

    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    font.draw(canvas, clamp(x), clamp(y), &text, BLACK);
}
