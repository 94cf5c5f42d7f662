//! Annotation session: state wiring for one photo being annotated.
//!
//! Owns the image handle, the mask store, the workflow, and the live
//! composite surface, and exposes the pointer-event entry points. All
//! mutation is synchronous; the session is meant to be driven from a
//! single event loop.
//!
//! # Load races
//!
//! Image decoding completes asynchronously in the host. If the user
//! selects a second image while the first is still decoding, only the
//! latest selection may initialize state. [`begin_load`] issues a
//! generation token; [`finish_load`] ignores completions whose token is
//! no longer current.
//!
//! [`begin_load`]: AnnotationSession::begin_load
//! [`finish_load`]: AnnotationSession::finish_load

use crate::brush::{self, BRUSH_RADIUS};
use crate::composite;
use crate::coords;
use crate::handle::ImageHandle;
use crate::store::RegionMaskStore;
use crate::types::{AnnotateConfig, AnnotateError, DisplayBox, Point, Region, RgbaImage};
use crate::workflow::{Workflow, WorkflowError};

/// Generation token pairing an image-load request with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// Outcome of [`AnnotationSession::finish_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image was decoded and the session reinitialized.
    Loaded,
    /// A newer load superseded this one; nothing changed.
    Stale,
}

/// Errors rejecting a submission attempt. State is never mutated by a
/// rejected attempt.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// No image has been loaded yet.
    #[error("no image loaded")]
    NoImage,

    /// Hair and skin must both be painted before analysis.
    #[error("hair and skin must both be painted before analysis")]
    RequiredRegionsUnpainted,

    /// A previous submission has not completed yet.
    #[error("an analysis request is already in flight")]
    SubmissionInFlight,
}

/// All mutable state for annotating one photo.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    config: AnnotateConfig,
    handle: Option<ImageHandle>,
    store: RegionMaskStore,
    workflow: Workflow,
    surface: Option<RgbaImage>,
    drawing: bool,
    generation: u64,
    submission_in_flight: bool,
}

impl AnnotationSession {
    /// Create an empty session with the given configuration.
    #[must_use]
    pub fn new(config: AnnotateConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Announce a new image selection and get its load token.
    ///
    /// Any token issued earlier becomes stale immediately, so an
    /// in-flight decode for a previous selection can no longer
    /// initialize the session.
    pub const fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        LoadToken(self.generation)
    }

    /// Complete an image load: decode the bytes and reinitialize every
    /// mask, the workflow, and the composite.
    ///
    /// A stale `token` returns [`LoadOutcome::Stale`] without touching
    /// any state (the bytes are not even decoded).
    ///
    /// # Errors
    ///
    /// Propagates [`AnnotateError`] from decoding when the token is
    /// current; session state is unchanged on error.
    pub fn finish_load(
        &mut self,
        token: LoadToken,
        bytes: Vec<u8>,
        filename: impl Into<String>,
    ) -> Result<LoadOutcome, AnnotateError> {
        if token.0 != self.generation {
            return Ok(LoadOutcome::Stale);
        }

        let handle = ImageHandle::decode(bytes, filename)?;
        self.store.initialize(self.config.backing);
        self.workflow.restart();
        self.drawing = false;
        self.surface = Some(composite::recomposite(
            handle.image(),
            &self.store,
            &self.config,
        ));
        self.handle = Some(handle);
        Ok(LoadOutcome::Loaded)
    }

    /// Pointer pressed on the drawable surface: start a stroke and
    /// stamp the first disc.
    pub fn pointer_down(&mut self, pointer: Point, display: DisplayBox) {
        self.drawing = true;
        self.paint_at(pointer, display);
    }

    /// Pointer moved: stamp another disc if a stroke is in progress.
    ///
    /// `display` is the surface's *current* bounding box; layout can
    /// change mid-stroke, so scale factors are derived per event.
    pub fn pointer_move(&mut self, pointer: Point, display: DisplayBox) {
        if self.drawing {
            self.paint_at(pointer, display);
        }
    }

    /// Pointer released: end the stroke.
    pub const fn pointer_up(&mut self) {
        self.drawing = false;
    }

    /// Pointer left the drawable surface: end the stroke.
    pub const fn pointer_leave(&mut self) {
        self.drawing = false;
    }

    /// Map, stamp into the active region's mask, and mirror the stamp
    /// onto the composite. Silent no-op before an image is loaded.
    fn paint_at(&mut self, pointer: Point, display: DisplayBox) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let backing = self.config.backing;
        let center = coords::map_to_backing(pointer, display, backing);
        let region = self.workflow.active();
        if self.store.paint(region, center, BRUSH_RADIUS) {
            brush::stamp_tint(surface, center, BRUSH_RADIUS, self.config.overlay_tint);
        }
    }

    /// Advance the workflow to the next region.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::RegionUnpainted`] when the active
    /// region has not been painted; nothing changes.
    pub fn advance(&mut self) -> Result<Region, WorkflowError> {
        self.workflow.advance(&self.store)
    }

    /// Clear one region's mask, move the active step to the earliest
    /// unpainted region, and rebuild the composite. Silent no-op before
    /// an image is loaded.
    pub fn reset_region(&mut self, region: Region) {
        let Some(handle) = self.handle.as_ref() else {
            return;
        };
        self.store.reset(region);
        self.workflow.recompute_after_reset(&self.store);
        self.surface = Some(composite::recomposite(
            handle.image(),
            &self.store,
            &self.config,
        ));
    }

    /// Whether the submit control should be enabled: hair and skin both
    /// painted. Hand never factors in.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        Workflow::can_submit(&self.store)
    }

    /// Gate a submission attempt and mark it in flight.
    ///
    /// At most one submission may be outstanding; the flag stays set
    /// until [`complete_submission`](Self::complete_submission) is
    /// called, whether the request succeeded or failed.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::NoImage`] before any image is loaded,
    /// [`SubmitError::RequiredRegionsUnpainted`] when the hair/skin
    /// gate fails, and [`SubmitError::SubmissionInFlight`] while a
    /// previous submission is outstanding.
    pub fn begin_submission(&mut self) -> Result<(), SubmitError> {
        if self.handle.is_none() {
            return Err(SubmitError::NoImage);
        }
        if !self.can_submit() {
            return Err(SubmitError::RequiredRegionsUnpainted);
        }
        if self.submission_in_flight {
            return Err(SubmitError::SubmissionInFlight);
        }
        self.submission_in_flight = true;
        Ok(())
    }

    /// Mark the outstanding submission finished (success or failure).
    /// Annotation state is untouched so a failed attempt can be retried
    /// without repainting.
    pub const fn complete_submission(&mut self) {
        self.submission_in_flight = false;
    }

    /// Whether a submission is currently outstanding.
    #[must_use]
    pub const fn submission_in_flight(&self) -> bool {
        self.submission_in_flight
    }

    /// The region currently accepting paint.
    #[must_use]
    pub const fn active_region(&self) -> Region {
        self.workflow.active()
    }

    /// Brush applications recorded for `region`.
    #[must_use]
    pub const fn paint_count(&self, region: Region) -> u32 {
        self.store.paint_count(region)
    }

    /// The mask store (for export).
    #[must_use]
    pub const fn store(&self) -> &RegionMaskStore {
        &self.store
    }

    /// The loaded image, if any (for export).
    #[must_use]
    pub const fn handle(&self) -> Option<&ImageHandle> {
        self.handle.as_ref()
    }

    /// The live composite surface, if an image is loaded.
    #[must_use]
    pub const fn composite(&self) -> Option<&RgbaImage> {
        self.surface.as_ref()
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &AnnotateConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    /// Helper: PNG bytes for a solid 600x450 photo.
    fn photo_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(600, 450, image::Rgba([180, 140, 120, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .ok();
        buf
    }

    /// A session with a 600x450 backing and a loaded photo, displayed
    /// 1:1 so pointer coordinates equal backing coordinates.
    fn loaded_session() -> (AnnotationSession, DisplayBox) {
        let config = AnnotateConfig {
            backing: Dimensions::new(600, 450),
            ..AnnotateConfig::default()
        };
        let mut session = AnnotationSession::new(config);
        let token = session.begin_load();
        assert_eq!(
            session.finish_load(token, photo_png(), "photo.png").unwrap(),
            LoadOutcome::Loaded
        );
        (session, DisplayBox::new(0.0, 0.0, 600.0, 450.0))
    }

    #[test]
    fn painting_before_load_is_a_silent_no_op() {
        let mut session = AnnotationSession::new(AnnotateConfig::default());
        let display = DisplayBox::new(0.0, 0.0, 400.0, 300.0);
        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_up();
        assert_eq!(session.paint_count(Region::Hair), 0);
        assert!(session.composite().is_none());
    }

    #[test]
    fn stale_load_token_is_ignored() {
        let mut session = AnnotationSession::new(AnnotateConfig::default());
        let first = session.begin_load();
        let second = session.begin_load();

        // The first selection's decode completes late: ignored, even
        // though its bytes are garbage (they are never decoded).
        assert_eq!(
            session
                .finish_load(first, vec![0xBA, 0xD0], "old.png")
                .unwrap(),
            LoadOutcome::Stale
        );
        assert!(session.handle().is_none());

        assert_eq!(
            session
                .finish_load(second, photo_png(), "new.png")
                .unwrap(),
            LoadOutcome::Loaded
        );
        assert_eq!(session.handle().unwrap().filename(), "new.png");
    }

    #[test]
    fn reload_clears_masks_and_restarts_workflow() {
        let (mut session, display) = loaded_session();
        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_up();
        session.advance().unwrap();
        assert_eq!(session.active_region(), Region::Skin);

        let token = session.begin_load();
        session.finish_load(token, photo_png(), "next.png").unwrap();
        assert_eq!(session.active_region(), Region::Hair);
        for region in Region::ALL {
            assert_eq!(session.paint_count(region), 0);
        }
    }

    #[test]
    fn move_without_down_does_not_paint() {
        let (mut session, display) = loaded_session();
        session.pointer_move(Point::new(100.0, 100.0), display);
        assert_eq!(session.paint_count(Region::Hair), 0);
    }

    #[test]
    fn pointer_leave_ends_the_stroke() {
        let (mut session, display) = loaded_session();
        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_leave();
        session.pointer_move(Point::new(120.0, 100.0), display);
        assert_eq!(session.paint_count(Region::Hair), 1);
    }

    #[test]
    fn strokes_route_to_the_active_region_only() {
        let (mut session, display) = loaded_session();
        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_up();
        session.advance().unwrap();

        session.pointer_down(Point::new(200.0, 200.0), display);
        session.pointer_up();

        assert_eq!(session.paint_count(Region::Hair), 1);
        assert_eq!(session.paint_count(Region::Skin), 1);
        assert_eq!(session.paint_count(Region::Hand), 0);
    }

    #[test]
    fn painting_tints_the_composite_incrementally() {
        let (mut session, display) = loaded_session();
        let before = session.composite().unwrap().get_pixel(100, 100).0;
        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_up();
        let after = session.composite().unwrap().get_pixel(100, 100).0;
        assert_ne!(before, after, "stamp should show immediately");
    }

    #[test]
    fn display_scaling_maps_pointer_to_backing() {
        let (mut session, _) = loaded_session();
        // Displayed at half size, offset by (10, 20).
        let display = DisplayBox::new(10.0, 20.0, 300.0, 225.0);
        session.pointer_down(Point::new(60.0, 70.0), display);
        session.pointer_up();

        // (60-10)*2 = 100, (70-20)*2 = 100.
        let mask = session.store().mask(Region::Hair).unwrap();
        assert_eq!(mask.get_pixel(100, 100).0[0], crate::types::MASK_FOREGROUND);
    }

    /// The end-to-end scenario from the workflow requirements: paint
    /// hair, advance, paint skin, then reset hair and watch the active
    /// step and submit gate fall back.
    #[test]
    fn full_workflow_scenario_at_600x450() {
        let (mut session, display) = loaded_session();

        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_up();
        assert_eq!(session.paint_count(Region::Hair), 1);
        assert_eq!(session.paint_count(Region::Skin), 0);
        assert_eq!(session.paint_count(Region::Hand), 0);
        assert_eq!(session.active_region(), Region::Hair);
        assert!(!session.can_submit());

        assert_eq!(session.advance(), Ok(Region::Skin));

        session.pointer_down(Point::new(300.0, 200.0), display);
        session.pointer_up();
        assert_eq!(session.paint_count(Region::Skin), 1);
        assert!(session.can_submit());

        session.reset_region(Region::Hair);
        assert_eq!(session.paint_count(Region::Hair), 0);
        assert_eq!(session.paint_count(Region::Skin), 1);
        assert_eq!(session.active_region(), Region::Hair);
        assert!(!session.can_submit());
    }

    #[test]
    fn incremental_stamp_matches_full_recomposite() {
        // The live tint and the mask share one rasterization, so a
        // rebuild from the masks must reproduce the incremental
        // composite byte for byte — otherwise a reset in one region
        // would visibly change strokes in untouched regions.
        let (mut session, display) = loaded_session();
        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_move(Point::new(3.0, 3.0), display); // edge graze
        session.pointer_up();

        let live = session.composite().unwrap().clone();
        let rebuilt = composite::recomposite(
            session.handle().unwrap().image(),
            session.store(),
            session.config(),
        );
        assert_eq!(live.as_raw(), rebuilt.as_raw());
    }

    #[test]
    fn reset_rebuilds_composite_without_the_cleared_marks() {
        let (mut session, display) = loaded_session();
        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_up();

        session.reset_region(Region::Hair);
        let base = session.handle().unwrap().image().get_pixel(100, 100).0;
        let shown = session.composite().unwrap().get_pixel(100, 100).0;
        assert_eq!(shown, base, "cleared stroke must disappear");
    }

    #[test]
    fn submission_gate_and_in_flight_flag() {
        let (mut session, display) = loaded_session();
        assert_eq!(
            session.begin_submission(),
            Err(SubmitError::RequiredRegionsUnpainted)
        );

        session.pointer_down(Point::new(100.0, 100.0), display);
        session.pointer_up();
        session.advance().unwrap();
        session.pointer_down(Point::new(300.0, 200.0), display);
        session.pointer_up();

        session.begin_submission().unwrap();
        assert!(session.submission_in_flight());
        assert_eq!(
            session.begin_submission(),
            Err(SubmitError::SubmissionInFlight)
        );

        // Failure path: state intact, retry allowed.
        session.complete_submission();
        assert_eq!(session.paint_count(Region::Hair), 1);
        session.begin_submission().unwrap();
    }

    #[test]
    fn submission_without_image_is_rejected() {
        let mut session = AnnotationSession::new(AnnotateConfig::default());
        assert_eq!(session.begin_submission(), Err(SubmitError::NoImage));
    }
}
