//! Region mask store: one fixed-resolution binary bitmap per region.
//!
//! The store is an arena of three mask buffers indexed by [`Region`],
//! plus a per-region paint counter. Masks exist only while an image is
//! loaded: the store starts uninitialized and every paint/reset before
//! [`initialize`](RegionMaskStore::initialize) is a silent no-op.
//!
//! Invariant: `paint_count(r) > 0` iff `mask(r)` contains at least one
//! foreground pixel. This holds because a paint call only increments
//! the counter when the brush disc actually touched the surface, and
//! reset clears both together.

use crate::brush;
use crate::types::{Dimensions, GrayImage, Point, Region};

/// Owns the per-region masks and paint counts.
#[derive(Debug, Clone, Default)]
pub struct RegionMaskStore {
    /// `None` until an image load initializes the store.
    masks: Option<[GrayImage; 3]>,
    counts: [u32; 3],
}

impl RegionMaskStore {
    /// Create an uninitialized store. Paint and reset calls are no-ops
    /// until [`initialize`](Self::initialize) runs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate all three masks at `resolution`, cleared to background,
    /// and zero every paint count. Called once per new image.
    pub fn initialize(&mut self, resolution: Dimensions) {
        let blank = || GrayImage::new(resolution.width, resolution.height);
        self.masks = Some([blank(), blank(), blank()]);
        self.counts = [0; 3];
    }

    /// Whether the store has been initialized since construction.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.masks.is_some()
    }

    /// Stamp a brush disc into `region`'s mask.
    ///
    /// Counts as one application (regardless of pixel count). Returns
    /// `true` if anything was painted; silently does nothing when the
    /// store is uninitialized or the disc misses the surface entirely.
    pub fn paint(&mut self, region: Region, center: Point, radius: i32) -> bool {
        let Some(masks) = self.masks.as_mut() else {
            return false;
        };
        let painted = brush::stamp_mask(&mut masks[region.index()], center, radius);
        if painted {
            self.counts[region.index()] += 1;
        }
        painted
    }

    /// Clear exactly `region`'s mask to background and zero its paint
    /// count. Other regions are untouched. No-op when uninitialized.
    pub fn reset(&mut self, region: Region) {
        let Some(masks) = self.masks.as_mut() else {
            return;
        };
        let mask = &mut masks[region.index()];
        *mask = GrayImage::new(mask.width(), mask.height());
        self.counts[region.index()] = 0;
    }

    /// Whether `region` has no brush applications (and therefore no
    /// foreground pixels).
    #[must_use]
    pub const fn is_empty(&self, region: Region) -> bool {
        self.counts[region.index()] == 0
    }

    /// Number of brush applications recorded for `region`.
    #[must_use]
    pub const fn paint_count(&self, region: Region) -> u32 {
        self.counts[region.index()]
    }

    /// Borrow `region`'s mask bitmap, if the store is initialized.
    #[must_use]
    pub fn mask(&self, region: Region) -> Option<&GrayImage> {
        self.masks.as_ref().map(|m| &m[region.index()])
    }

    /// Iterate over the non-empty masks in workflow priority order.
    pub fn painted_masks(&self) -> impl Iterator<Item = (Region, &GrayImage)> {
        Region::ALL
            .into_iter()
            .filter(|r| !self.is_empty(*r))
            .filter_map(|r| self.mask(r).map(|m| (r, m)))
    }
}
