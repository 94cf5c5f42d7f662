//! Composite preview rendering: base photo plus translucent mask
//! overlays.
//!
//! Painting updates the composite incrementally (the brush stamps its
//! tint directly), but a reset removes pixels, which additive drawing
//! cannot express. So after any destructive mutation the whole surface
//! is rebuilt here: photo first, letterboxed to preserve aspect ratio,
//! then a 1-pixel tint mark for every foreground pixel of every
//! non-empty mask.

use image::imageops::FilterType;
use image::{Pixel, Rgba};

use crate::store::RegionMaskStore;
use crate::types::{AnnotateConfig, Dimensions, MASK_FOREGROUND, RgbaImage};

/// Placement of the photo within the composite surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitRect {
    /// Left offset of the drawn photo.
    pub x: i64,
    /// Top offset of the drawn photo.
    pub y: i64,
    /// Drawn width.
    pub width: u32,
    /// Drawn height.
    pub height: u32,
}

/// Compute the aspect-preserving letterbox placement of `image` within
/// `surface`.
///
/// If the image is proportionally wider than the surface, width fills
/// the surface and the height is centered vertically; otherwise height
/// fills and the width is centered horizontally.
#[must_use]
pub fn fit_rect(image: Dimensions, surface: Dimensions) -> FitRect {
    let (w, h) = if image.aspect() > surface.aspect() {
        let w = f64::from(surface.width);
        (w, w / image.aspect())
    } else {
        let h = f64::from(surface.height);
        (h * image.aspect(), h)
    };

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (width, height) = (w.round() as u32, h.round() as u32);
    #[expect(clippy::cast_possible_truncation)]
    let x = ((f64::from(surface.width) - w) / 2.0).round() as i64;
    #[expect(clippy::cast_possible_truncation)]
    let y = ((f64::from(surface.height) - h) / 2.0).round() as i64;

    FitRect {
        x,
        y,
        width,
        height,
    }
}

/// Rebuild the composite surface from scratch.
///
/// Clears to opaque black, draws `base` letterboxed at the configured
/// backing resolution (Triangle resampling), then tints every
/// foreground pixel of every non-empty mask with the configured
/// overlay color.
#[must_use]
pub fn recomposite(
    base: &RgbaImage,
    store: &RegionMaskStore,
    config: &AnnotateConfig,
) -> RgbaImage {
    let backing = config.backing;
    let mut surface =
        RgbaImage::from_pixel(backing.width, backing.height, Rgba([0, 0, 0, 255]));

    let rect = fit_rect(
        Dimensions::new(base.width(), base.height()),
        backing,
    );
    if rect.width > 0 && rect.height > 0 {
        let scaled = image::imageops::resize(base, rect.width, rect.height, FilterType::Triangle);
        image::imageops::overlay(&mut surface, &scaled, rect.x, rect.y);
    }

    let tint = Rgba(config.overlay_tint);
    for (_, mask) in store.painted_masks() {
        for (x, y, p) in mask.enumerate_pixels() {
            if p.0[0] == MASK_FOREGROUND && x < surface.width() && y < surface.height() {
                surface.get_pixel_mut(x, y).blend(&tint);
            }
        }
    }

    surface
}
