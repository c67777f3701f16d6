//! Layer composition: frame, photo, corner decoration, message overlay.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::assets::FrameTemplate;

/// Gap between the corner decoration and the bottom edge of the card.
pub const CORNER_BOTTOM_MARGIN: i64 = 15;

/// Top-left anchor of the message layer (sticker or text).
pub const MESSAGE_ANCHOR: (u32, u32) = (10, 80);

/// Paste `layer` onto `base` at (`x`, `y`), using the layer's alpha as mask.
///
/// Every channel is blended as `src * a + dst * (255 - a)`, so transparent
/// pixels leave the base untouched. Pixels outside `base` are dropped.
pub fn paste_with_alpha(base: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    let (bw, bh) = (i64::from(base.width()), i64::from(base.height()));
    for (dx, dy, pixel) in layer.enumerate_pixels() {
        let tx = x + i64::from(dx);
        let ty = y + i64::from(dy);
        if tx < 0 || ty < 0 || tx >= bw || ty >= bh {
            continue;
        }
        let alpha = pixel[3];
        if alpha == 0 {
            continue;
        }
        let (tx, ty) = (tx as u32, ty as u32);
        if alpha == 255 {
            base.put_pixel(tx, ty, *pixel);
        } else {
            let blended = blend_pixel(base.get_pixel(tx, ty), pixel, alpha);
            base.put_pixel(tx, ty, blended);
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = u32::from(alpha);
    let inv = 255 - a;
    let mix = |f: u8, b: u8| ((u32::from(f) * a + u32::from(b) * inv + 127) / 255) as u8;
    Rgba([
        mix(fg[0], bg[0]),
        mix(fg[1], bg[1]),
        mix(fg[2], bg[2]),
        mix(fg[3], bg[3]),
    ])
}

/// Dimensions of a `width` x `height` layer anchored at `anchor`, truncated to the canvas.
///
/// Only the axes that would overflow are shortened; the layer is never grown.
pub fn clip_to_canvas(
    width: u32,
    height: u32,
    anchor: (u32, u32),
    canvas: (u32, u32),
) -> (u32, u32) {
    let (ax, ay) = anchor;
    let (cw, ch) = canvas;
    let w = if ax.saturating_add(width) > cw {
        cw.saturating_sub(ax)
    } else {
        width
    };
    let h = if ay.saturating_add(height) > ch {
        ch.saturating_sub(ay)
    } else {
        height
    };
    (w, h)
}

/// Composite the card layers onto a fresh copy of the template.
///
/// Layers, bottom to top: template, photo at the slot, corner decoration
/// centered near the bottom, message layer at [`MESSAGE_ANCHOR`]. The
/// result always has the template's dimensions.
pub fn compose(
    template: &FrameTemplate,
    photo: &RgbaImage,
    corner: Option<&RgbaImage>,
    message: Option<&RgbaImage>,
) -> RgbaImage {
    let mut canvas = template.image().clone();
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));

    let slot = template.slot();
    paste_with_alpha(&mut canvas, photo, i64::from(slot.x), i64::from(slot.y));

    if let Some(corner) = corner {
        let x = (cw - i64::from(corner.width())).div_euclid(2);
        let y = ch - i64::from(corner.height()) - CORNER_BOTTOM_MARGIN;
        debug!(x, y, "Pasting corner decoration");
        paste_with_alpha(&mut canvas, corner, x, y);
    }

    if let Some(layer) = message {
        let (w, h) = clip_to_canvas(
            layer.width(),
            layer.height(),
            MESSAGE_ANCHOR,
            canvas.dimensions(),
        );
        let (ax, ay) = MESSAGE_ANCHOR;
        debug!(w, h, "Pasting message layer");
        if (w, h) == layer.dimensions() {
            paste_with_alpha(&mut canvas, layer, i64::from(ax), i64::from(ay));
        } else if w > 0 && h > 0 {
            let clipped = image::imageops::crop_imm(layer, 0, 0, w, h).to_image();
            paste_with_alpha(&mut canvas, &clipped, i64::from(ax), i64::from(ay));
        }
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PhotoSlot;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn small_template() -> FrameTemplate {
        FrameTemplate::new(
            RgbaImage::from_pixel(60, 120, WHITE),
            PhotoSlot {
                x: 5,
                y: 5,
                side: 40,
            },
        )
        .unwrap()
    }

    #[test]
    fn paste_opaque_replaces_pixels() {
        let mut base = RgbaImage::from_pixel(10, 10, WHITE);
        let top = RgbaImage::from_pixel(2, 2, RED);
        paste_with_alpha(&mut base, &top, 3, 3);
        assert_eq!(base.get_pixel(3, 3), &RED);
        assert_eq!(base.get_pixel(4, 4), &RED);
        assert_eq!(base.get_pixel(5, 5), &WHITE);
    }

    #[test]
    fn paste_transparent_keeps_base() {
        let mut base = RgbaImage::from_pixel(10, 10, WHITE);
        let top = RgbaImage::from_pixel(10, 10, CLEAR);
        paste_with_alpha(&mut base, &top, 0, 0);
        assert!(base.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn paste_half_alpha_blends() {
        let mut base = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let top = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
        paste_with_alpha(&mut base, &top, 0, 0);
        let px = base.get_pixel(0, 0);
        assert_eq!(px[0], 128);
        // alpha channel is blended as well: 128*128 + 255*127 over 255
        assert_eq!(px[3], 191);
    }

    #[test]
    fn paste_does_not_panic_on_out_of_bounds() {
        let mut base = RgbaImage::new(100, 100);
        let top = RgbaImage::from_pixel(50, 50, RED);
        paste_with_alpha(&mut base, &top, 80, 80);
        paste_with_alpha(&mut base, &top, -30, -30);
        assert_eq!(base.get_pixel(99, 99), &RED);
        assert_eq!(base.get_pixel(0, 0), &RED);
    }

    #[test]
    fn clip_leaves_fitting_layer_alone() {
        assert_eq!(clip_to_canvas(100, 50, (10, 80), (420, 500)), (100, 50));
    }

    #[test]
    fn clip_truncates_each_axis_independently() {
        assert_eq!(clip_to_canvas(500, 50, (10, 80), (420, 500)), (410, 50));
        assert_eq!(clip_to_canvas(100, 600, (10, 80), (420, 500)), (100, 420));
        assert_eq!(clip_to_canvas(500, 600, (10, 80), (420, 500)), (410, 420));
    }

    #[test]
    fn clip_anchor_outside_canvas_gives_zero() {
        assert_eq!(clip_to_canvas(10, 10, (10, 80), (5, 50)), (0, 0));
    }

    #[test]
    fn compose_places_photo_at_slot() {
        let tpl = small_template();
        let photo = RgbaImage::from_pixel(40, 40, RED);
        let out = compose(&tpl, &photo, None, None);
        assert_eq!(out.get_pixel(4, 4), &WHITE);
        assert_eq!(out.get_pixel(5, 5), &RED);
        assert_eq!(out.get_pixel(44, 44), &RED);
        assert_eq!(out.get_pixel(45, 45), &WHITE);
    }

    #[test]
    fn compose_does_not_touch_template() {
        let tpl = small_template();
        let photo = RgbaImage::from_pixel(40, 40, RED);
        let _ = compose(&tpl, &photo, None, None);
        assert!(tpl.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn compose_centers_corner_above_bottom_margin() {
        let tpl = small_template();
        let photo = RgbaImage::from_pixel(40, 40, WHITE);
        let corner = RgbaImage::from_pixel(20, 10, RED);
        let out = compose(&tpl, &photo, Some(&corner), None);
        // x = (60 - 20) / 2 = 20, y = 120 - 10 - 15 = 95
        assert_eq!(out.get_pixel(20, 95), &RED);
        assert_eq!(out.get_pixel(39, 104), &RED);
        assert_eq!(out.get_pixel(19, 95), &WHITE);
        assert_eq!(out.get_pixel(20, 105), &WHITE);
    }

    #[test]
    fn compose_clips_oversized_message_layer() {
        let tpl = small_template();
        let photo = RgbaImage::from_pixel(40, 40, WHITE);
        let message = RgbaImage::from_pixel(200, 200, RED);
        let out = compose(&tpl, &photo, None, Some(&message));
        assert_eq!(out.dimensions(), (60, 120));
        assert_eq!(out.get_pixel(10, 80), &RED);
        assert_eq!(out.get_pixel(59, 119), &RED);
        assert_eq!(out.get_pixel(9, 80), &WHITE);
        assert_eq!(out.get_pixel(10, 79), &WHITE);
    }

    #[test]
    fn compose_keeps_template_dimensions_with_all_layers() {
        let tpl = small_template();
        let photo = RgbaImage::from_pixel(40, 40, RED);
        let corner = RgbaImage::from_pixel(300, 300, RED);
        let message = RgbaImage::from_pixel(300, 300, RED);
        let out = compose(&tpl, &photo, Some(&corner), Some(&message));
        assert_eq!(out.dimensions(), (tpl.width(), tpl.height()));
    }
}
