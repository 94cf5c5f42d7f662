//! Brush rasterization: a fixed-radius disc stamp.
//!
//! Every stamp is drawn twice. The authoritative copy goes into the
//! active region's mask as opaque foreground; a translucent tint goes
//! onto the visible composite so the user sees the stroke over the
//! photo. Both stamps share one rasterization — the disc is rendered
//! once into a stencil and blitted — so the preview never disagrees
//! with the mask at the disc boundary. The stamp is hard-edged (no
//! anti-aliasing), which keeps the foreground test a simple
//! exact-equality check.

use image::{Luma, Pixel, Rgba};
use imageproc::drawing::draw_filled_circle_mut;

use crate::types::{GrayImage, MASK_FOREGROUND, Point, RgbaImage};

/// Brush disc radius in backing pixels. Fixed, not user-configurable.
pub const BRUSH_RADIUS: i32 = 5;

/// Rasterize the brush disc into a `(2r+1)²` stencil.
///
/// The stencil is the single source of truth for the disc's pixel
/// coverage: both [`stamp_mask`] and [`stamp_tint`] blit from it, and
/// "did this stamp paint anything" is answered from it too.
fn disc_stencil(radius: i32) -> GrayImage {
    #[expect(clippy::cast_sign_loss)]
    let size = (2 * radius + 1) as u32;
    let mut stencil = GrayImage::new(size, size);
    draw_filled_circle_mut(&mut stencil, (radius, radius), radius, Luma([MASK_FOREGROUND]));
    stencil
}

/// Visit every in-bounds surface pixel covered by a disc stamped at
/// `center`. Returns `true` if at least one pixel was visited.
fn for_each_disc_pixel(
    center: Point,
    radius: i32,
    width: u32,
    height: u32,
    mut visit: impl FnMut(u32, u32),
) -> bool {
    #[expect(clippy::cast_possible_truncation)]
    let (cx, cy) = (center.x.round() as i64, center.y.round() as i64);
    let r = i64::from(radius);
    let (w, h) = (i64::from(width), i64::from(height));

    let mut any = false;
    for (sx, sy, p) in disc_stencil(radius).enumerate_pixels() {
        if p.0[0] != MASK_FOREGROUND {
            continue;
        }
        let (x, y) = (cx - r + i64::from(sx), cy - r + i64::from(sy));
        if x < 0 || y < 0 || x >= w || y >= h {
            continue;
        }
        any = true;
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        visit(x as u32, y as u32);
    }
    any
}

/// Stamp an opaque foreground disc onto a mask.
///
/// Pixels covered by the disc (clipped at the bitmap edge) are set to
/// [`MASK_FOREGROUND`]. Returns `true` iff at least one pixel was
/// actually set — a disc that only grazes past the surface without
/// covering any pixel reports `false`.
pub fn stamp_mask(mask: &mut GrayImage, center: Point, radius: i32) -> bool {
    let (w, h) = (mask.width(), mask.height());
    for_each_disc_pixel(center, radius, w, h, |x, y| {
        mask.put_pixel(x, y, Luma([MASK_FOREGROUND]));
    })
}

/// Stamp a translucent tinted disc onto the composite surface.
///
/// Alpha-blends `tint` over the existing pixels so the photo stays
/// visible underneath the stroke. Covers exactly the pixels
/// [`stamp_mask`] marks foreground for the same center and radius.
pub fn stamp_tint(surface: &mut RgbaImage, center: Point, radius: i32, tint: [u8; 4]) {
    let tint = Rgba(tint);
    let (w, h) = (surface.width(), surface.height());
    for_each_disc_pixel(center, radius, w, h, |x, y| {
        surface.get_pixel_mut(x, y).blend(&tint);
    });
}
