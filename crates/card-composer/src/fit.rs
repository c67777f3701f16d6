//! Aspect-fit resize and center crop into the square photo slot.
//!
//! The photo is scaled so its shorter side matches the slot, then the
//! centered square window is cut out. No letterboxing, no distortion.
//! The window is located in source coordinates and only it is resampled.

use image::imageops::{self, FilterType};
use image::{GenericImageView, Rgba, RgbaImage};
use tracing::debug;

use crate::error::CompositionError;

/// Size the photo is scaled to before cropping.
///
/// Wide (and square) photos get their height fixed to `target_side`,
/// tall photos their width. Dimensions never drop below `target_side`.
pub fn intermediate_size(width: u32, height: u32, target_side: u32) -> (u32, u32) {
    let ratio = f64::from(width) / f64::from(height);
    let side = f64::from(target_side);

    let (w, h) = if ratio >= 1.0 {
        ((ratio * side) as u32, target_side)
    } else {
        (target_side, (side / ratio) as u32)
    };

    (w.max(target_side), h.max(target_side))
}

/// Top-left corner of the centered `target_side` square inside `(width, height)`.
pub fn crop_window(width: u32, height: u32, target_side: u32) -> (u32, u32) {
    let left = width.saturating_sub(target_side) / 2;
    let top = height.saturating_sub(target_side) / 2;
    (left, top)
}

/// Region of the source photo that ends up in the slot, as `(x, y, width, height)`.
///
/// This is the [`crop_window`] of the [`intermediate_size`] mapped back to
/// source pixels, so only that region is ever resampled.
pub fn source_window(width: u32, height: u32, target_side: u32) -> (u32, u32, u32, u32) {
    let (new_w, new_h) = intermediate_size(width, height, target_side);
    let (left, top) = crop_window(new_w, new_h, target_side);
    let (x, w) = map_to_source(left, target_side, width, new_w);
    let (y, h) = map_to_source(top, target_side, height, new_h);
    (x, y, w, h)
}

// `orig` and `scaled` are non-zero; the span is at least one source pixel.
fn map_to_source(offset: u32, span: u32, orig: u32, scaled: u32) -> (u32, u32) {
    let (orig64, scaled64) = (u64::from(orig), u64::from(scaled));
    let start = (u64::from(offset) * orig64 / scaled64).min(orig64 - 1);
    let len = (u64::from(span) * orig64 * 2 + scaled64) / (2 * scaled64);
    let len = len.clamp(1, orig64 - start);
    (start as u32, len as u32)
}

/// Scale and center-crop `photo` to exactly `target_side` x `target_side`.
///
/// Memory use is bounded by the source window and the slot, whatever the
/// photo's aspect ratio.
pub fn fit_and_crop<I>(photo: &I, target_side: u32) -> Result<RgbaImage, CompositionError>
where
    I: GenericImageView<Pixel = Rgba<u8>> + 'static,
{
    let (orig_w, orig_h) = photo.dimensions();
    if orig_w == 0 || orig_h == 0 {
        return Err(CompositionError::Decode(format!(
            "photo has empty dimensions {orig_w}x{orig_h}"
        )));
    }

    let (x, y, w, h) = source_window(orig_w, orig_h, target_side);
    debug!(orig_w, orig_h, x, y, w, h, target_side, "Fitting photo to slot");

    let window = imageops::crop_imm(photo, x, y, w, h).to_image();
    if (w, h) == (target_side, target_side) {
        return Ok(window);
    }
    Ok(imageops::resize(&window, target_side, target_side, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([128, 64, 32, 255]))
    }

    #[test]
    fn intermediate_size_landscape() {
        assert_eq!(intermediate_size(800, 400, 346), (692, 346));
    }

    #[test]
    fn intermediate_size_portrait() {
        assert_eq!(intermediate_size(400, 800, 346), (346, 692));
    }

    #[test]
    fn intermediate_size_square_matches_target() {
        assert_eq!(intermediate_size(1000, 1000, 346), (346, 346));
        assert_eq!(intermediate_size(10, 10, 346), (346, 346));
    }

    #[test]
    fn intermediate_size_never_below_target() {
        // 1001/1000 * 346 truncates to 346; 1000/1001 gives 346.34 -> 346
        let (w, h) = intermediate_size(1000, 1001, 346);
        assert!(w >= 346 && h >= 346);
    }

    #[test]
    fn crop_window_landscape() {
        assert_eq!(crop_window(692, 346, 346), (173, 0));
    }

    #[test]
    fn crop_window_portrait() {
        assert_eq!(crop_window(346, 692, 346), (0, 173));
    }

    #[test]
    fn crop_window_odd_excess_floors() {
        assert_eq!(crop_window(349, 346, 346), (1, 0));
    }

    #[test]
    fn fit_landscape_is_square() {
        let out = fit_and_crop(&create_test_image(800, 400), 346).unwrap();
        assert_eq!(out.dimensions(), (346, 346));
    }

    #[test]
    fn fit_portrait_is_square() {
        let out = fit_and_crop(&create_test_image(400, 800), 346).unwrap();
        assert_eq!(out.dimensions(), (346, 346));
    }

    #[test]
    fn fit_square_is_square() {
        let out = fit_and_crop(&create_test_image(500, 500), 346).unwrap();
        assert_eq!(out.dimensions(), (346, 346));
    }

    #[test]
    fn fit_upscales_tiny_photo() {
        let out = fit_and_crop(&create_test_image(3, 7), 50).unwrap();
        assert_eq!(out.dimensions(), (50, 50));
    }

    #[test]
    fn fit_extreme_aspect_ratio() {
        let out = fit_and_crop(&create_test_image(2000, 1), 40).unwrap();
        assert_eq!(out.dimensions(), (40, 40));
    }

    #[test]
    fn source_window_matches_scaled_crop() {
        assert_eq!(source_window(800, 400, 346), (200, 0, 400, 400));
        assert_eq!(source_window(400, 800, 346), (0, 200, 400, 400));
        assert_eq!(source_window(346, 346, 346), (0, 0, 346, 346));
    }

    #[test]
    fn source_window_of_extreme_aspect_is_one_pixel_wide() {
        assert_eq!(source_window(20000, 1, 346), (9999, 0, 1, 1));
        assert_eq!(source_window(1, 20000, 346), (0, 9999, 1, 1));
    }

    #[test]
    fn fit_extreme_aspect_at_slot_side() {
        // intermediate would be 6_920_000 x 346; only the 1px window is resampled
        let out = fit_and_crop(&create_test_image(20000, 1), 346).unwrap();
        assert_eq!(out.dimensions(), (346, 346));
        let out = fit_and_crop(&create_test_image(1, 20000), 346).unwrap();
        assert_eq!(out.dimensions(), (346, 346));
        assert!(out.pixels().all(|p| *p == Rgba([128, 64, 32, 255])));
    }

    #[test]
    fn fit_accepts_dynamic_image() {
        let photo = image::DynamicImage::ImageRgba8(create_test_image(640, 480));
        let out = fit_and_crop(&photo, 346).unwrap();
        assert_eq!(out.dimensions(), (346, 346));
    }

    #[test]
    fn fit_keeps_center_region() {
        // Left third red, middle third green, right third blue.
        let mut img = RgbaImage::new(300, 100);
        for (x, _, px) in img.enumerate_pixels_mut() {
            *px = match x {
                0..100 => Rgba([255, 0, 0, 255]),
                100..200 => Rgba([0, 255, 0, 255]),
                _ => Rgba([0, 0, 255, 255]),
            };
        }
        let out = fit_and_crop(&img, 100).unwrap();
        assert_eq!(out.get_pixel(50, 50), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn fit_rejects_empty_image() {
        let err = fit_and_crop(&RgbaImage::new(0, 10), 346).unwrap_err();
        assert!(matches!(err, CompositionError::Decode(_)));
    }
}
