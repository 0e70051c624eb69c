//! Alpha compositing of RGBA overlays onto a frame.

use image::{Rgba, RgbaImage};

/// Blend `foreground` onto `background` in place ("over" operator).
///
/// # Arguments
/// * `background` - Destination frame, modified in place
/// * `foreground` - Overlay image
/// * `opacity` - Global overlay opacity, clamped to [0, 1]
/// * `offset` - Overlay top-left corner in background pixels (may be negative)
///
/// Overlay pixels landing outside the background are skipped.
pub fn composite(
    background: &mut RgbaImage,
    foreground: &RgbaImage,
    opacity: f32,
    offset: (i64, i64),
) {
    let opacity = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (bg_w, bg_h) = (background.width() as i64, background.height() as i64);

    for (x, y, fg) in foreground.enumerate_pixels() {
        let bx = x as i64 + offset.0;
        let by = y as i64 + offset.1;
        if bx < 0 || by < 0 || bx >= bg_w || by >= bg_h {
            continue;
        }

        let bg = background.get_pixel_mut(bx as u32, by as u32);
        *bg = blend(*bg, *fg, opacity);
    }
}

fn blend(bg: Rgba<u8>, fg: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let a = fg[3] as f32 / 255.0 * opacity;
    let bg_a = bg[3] as f32 / 255.0;

    let mix = |f: u8, b: u8| (f as f32 * a + b as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
    let alpha = ((a + bg_a * (1.0 - a)) * 255.0).round().clamp(0.0, 255.0) as u8;

    Rgba([mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2]), alpha])
}
