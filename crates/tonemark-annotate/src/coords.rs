//! Pointer-to-backing coordinate mapping.
//!
//! The drawable surface has a fixed backing resolution but is displayed
//! at whatever size the layout gives it. Pointer events arrive in
//! display coordinates; brush stamps need backing-bitmap coordinates.
//! The scale factors depend on the current displayed size, which can
//! change between any two events, so the mapping is recomputed per
//! event from a fresh [`DisplayBox`].

use crate::types::{Dimensions, DisplayBox, Point};

/// Map a pointer position in display coordinates to backing-bitmap
/// coordinates.
///
/// `bx = (px - left) * (backing_w / display_w)`, and likewise for `y`.
///
/// No clamping is performed: positions near the surface edge can map
/// slightly outside `[0, W) × [0, H)`. Brush rasterization clips at the
/// bitmap boundary, so callers pass the result through unchecked.
#[must_use]
pub fn map_to_backing(pointer: Point, display: DisplayBox, backing: Dimensions) -> Point {
    let scale_x = f64::from(backing.width) / display.width;
    let scale_y = f64::from(backing.height) / display.height;
    Point::new(
        (pointer.x - display.left) * scale_x,
        (pointer.y - display.top) * scale_y,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_corners_map_to_backing_corners() {
        let display = DisplayBox::new(13.0, 27.0, 200.0, 150.0);
        let backing = Dimensions::new(400, 300);

        let origin = map_to_backing(Point::new(13.0, 27.0), display, backing);
        assert_eq!(origin, Point::new(0.0, 0.0));

        let far = map_to_backing(Point::new(13.0 + 200.0, 27.0 + 150.0), display, backing);
        assert_eq!(far, Point::new(400.0, 300.0));
    }

    #[test]
    fn identity_when_display_matches_backing() {
        let display = DisplayBox::new(0.0, 0.0, 400.0, 300.0);
        let backing = Dimensions::new(400, 300);
        let p = map_to_backing(Point::new(123.0, 45.0), display, backing);
        assert_eq!(p, Point::new(123.0, 45.0));
    }

    #[test]
    fn axes_scale_independently() {
        // Displayed at half width but full height.
        let display = DisplayBox::new(0.0, 0.0, 200.0, 300.0);
        let backing = Dimensions::new(400, 300);
        let p = map_to_backing(Point::new(50.0, 50.0), display, backing);
        assert_eq!(p, Point::new(100.0, 50.0));
    }

    #[test]
    fn points_outside_the_box_are_not_clamped() {
        let display = DisplayBox::new(10.0, 10.0, 100.0, 100.0);
        let backing = Dimensions::new(400, 300);
        let p = map_to_backing(Point::new(0.0, 0.0), display, backing);
        assert!(p.x < 0.0 && p.y < 0.0);
    }
}
