//! Shared types for the tonemark annotation engine.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference mask
/// bitmaps without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the
/// composite surface and decoded photo without depending on `image`
/// directly.
pub use image::RgbaImage;

/// Mask pixel value marking a painted (foreground) pixel.
///
/// The foreground test is exact equality with this value. The brush
/// stamp is hard-edged, so intermediate values never occur in a mask.
pub const MASK_FOREGROUND: u8 = 255;

/// Mask pixel value marking an unpainted (background) pixel.
pub const MASK_BACKGROUND: u8 = 0;

/// An annotatable anatomical region.
///
/// Ordered by workflow priority: hair is painted first, then skin,
/// then (optionally) hand. The derived `Ord` matches this priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Hair — required before submission.
    Hair,
    /// Skin — required before submission.
    Skin,
    /// Hand — optional; never blocks submission.
    Hand,
}

impl Region {
    /// All regions in workflow priority order.
    pub const ALL: [Self; 3] = [Self::Hair, Self::Skin, Self::Hand];

    /// Lowercase wire name (`"hair"`, `"skin"`, `"hand"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hair => "hair",
            Self::Skin => "skin",
            Self::Hand => "hand",
        }
    }

    /// The region after this one in priority order, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Hair => Some(Self::Skin),
            Self::Skin => Some(Self::Hand),
            Self::Hand => None,
        }
    }

    /// Index into per-region arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2D point in backing-bitmap or pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Image or surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width ÷ height.
    #[must_use]
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// The on-screen bounding box of the drawable surface, in display
/// (pointer-event) coordinates.
///
/// Layout can change between pointer events, so callers query this
/// fresh for every event rather than caching it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayBox {
    /// Left edge of the surface in display coordinates.
    pub left: f64,
    /// Top edge of the surface in display coordinates.
    pub top: f64,
    /// Displayed width.
    pub width: f64,
    /// Displayed height.
    pub height: f64,
}

impl DisplayBox {
    /// Create a new display box.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Configuration for the annotation engine.
///
/// All parameters have defaults matching the original canvas tool.
/// The brush radius is intentionally absent: it is a fixed constant
/// ([`crate::brush::BRUSH_RADIUS`]), not a tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotateConfig {
    /// Backing resolution of the drawable surface and every mask.
    pub backing: Dimensions,

    /// RGBA tint stamped over the photo for painted pixels. The alpha
    /// channel makes the annotation translucent so the photo stays
    /// visible underneath.
    pub overlay_tint: [u8; 4],
}

impl AnnotateConfig {
    /// Default backing resolution width.
    pub const DEFAULT_BACKING_WIDTH: u32 = 400;

    /// Default backing resolution height.
    pub const DEFAULT_BACKING_HEIGHT: u32 = 300;

    /// Default overlay tint: red at 40% opacity.
    pub const DEFAULT_OVERLAY_TINT: [u8; 4] = [255, 0, 0, 102];
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            backing: Dimensions::new(Self::DEFAULT_BACKING_WIDTH, Self::DEFAULT_BACKING_HEIGHT),
            overlay_tint: Self::DEFAULT_OVERLAY_TINT,
        }
    }
}

/// Errors that can occur while loading an image into the engine.
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// Failed to decode the uploaded image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The uploaded image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn regions_are_ordered_by_workflow_priority() {
        assert!(Region::Hair < Region::Skin);
        assert!(Region::Skin < Region::Hand);
    }

    #[test]
    fn region_next_walks_forward_and_terminates() {
        assert_eq!(Region::Hair.next(), Some(Region::Skin));
        assert_eq!(Region::Skin.next(), Some(Region::Hand));
        assert_eq!(Region::Hand.next(), None);
    }

    #[test]
    fn region_serializes_to_lowercase_wire_name() {
        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region.name()));
        }
    }

    #[test]
    fn config_default_matches_original_canvas() {
        let config = AnnotateConfig::default();
        assert_eq!(config.backing, Dimensions::new(400, 300));
        assert_eq!(config.overlay_tint, [255, 0, 0, 102]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AnnotateConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AnnotateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
