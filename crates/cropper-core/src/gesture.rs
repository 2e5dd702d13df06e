//! Press, drag, release: the pointer gesture state machine.
//!
//! A gesture records where the pointer went down and what the region
//! looked like at that moment. Each drag update measures displacement
//! from that origin, builds a candidate rectangle, and hands it to
//! [`Bounds::clamp`]. Updates are therefore absolute, not cumulative,
//! and a missed pointer-move event never accumulates drift.

use crate::region::{Bounds, CropRegion, bounded};
use crate::types::{Delta, Point};

/// A resize handle on the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Top-left corner. The bottom-right corner stays fixed.
    TopLeft,
    /// Bottom-right corner. The top-left corner stays fixed.
    BottomRight,
}

impl Handle {
    /// Both handles, in render order.
    pub const ALL: [Self; 2] = [Self::TopLeft, Self::BottomRight];

    /// CSS cursor shown over the handle.
    #[must_use]
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::TopLeft => "nw-resize",
            Self::BottomRight => "se-resize",
        }
    }
}

/// What a gesture does to the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Translate the region; size never changes.
    Move,
    /// Resize from one corner.
    Resize(Handle),
}

impl GestureKind {
    /// The unclamped rectangle this gesture proposes for `delta`.
    #[must_use]
    pub fn candidate(self, start: CropRegion, delta: Delta) -> CropRegion {
        let Delta { dx, dy } = delta;
        match self {
            Self::Move => CropRegion::new(start.x + dx, start.y + dy, start.width, start.height),
            Self::Resize(Handle::BottomRight) => {
                CropRegion::new(start.x, start.y, start.width + dx, start.height + dy)
            }
            Self::Resize(Handle::TopLeft) => CropRegion::new(
                start.x + dx,
                start.y + dy,
                start.width - dx,
                start.height - dy,
            ),
        }
    }

    /// Restrict `delta` so the fixed corner of a resize stays put.
    ///
    /// Without this, a clamped width would be absorbed by moving the
    /// anchored edge. Moves need no restriction: the region clamp keeps
    /// their size and slides them back inside.
    #[must_use]
    pub fn limit_delta(self, start: CropRegion, delta: Delta, bounds: &Bounds) -> Delta {
        let size = bounds.size();
        match self {
            Self::Move => delta,
            Self::Resize(Handle::BottomRight) => Delta::new(
                bounded(
                    delta.dx,
                    bounds.min_width() - start.width,
                    size.width - start.right(),
                ),
                bounded(
                    delta.dy,
                    bounds.min_height() - start.height,
                    size.height - start.bottom(),
                ),
            ),
            Self::Resize(Handle::TopLeft) => Delta::new(
                bounded(delta.dx, -start.x, start.width - bounds.min_width()),
                bounded(delta.dy, -start.y, start.height - bounds.min_height()),
            ),
        }
    }
}

/// One in-progress gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// What the gesture does.
    pub kind: GestureKind,
    /// Pointer position at press.
    pub origin: Point,
    /// Region at press.
    pub start: CropRegion,
}

impl Gesture {
    /// The clamped region for the pointer now at `pointer`.
    #[must_use]
    pub fn update(&self, pointer: Point, bounds: &Bounds) -> CropRegion {
        let delta = self
            .kind
            .limit_delta(self.start, pointer - self.origin, bounds);
        bounds.clamp(self.kind.candidate(self.start, delta))
    }
}

/// Tracks at most one active gesture.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    active: Option<Gesture>,
}

impl GestureController {
    /// Create an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Begin a gesture.
    ///
    /// Returns `false` and leaves the running gesture untouched if one
    /// is already active.
    pub fn press(&mut self, kind: GestureKind, pointer: Point, region: CropRegion) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(Gesture {
            kind,
            origin: pointer,
            start: region,
        });
        true
    }

    /// The region for a pointer move, or `None` when idle.
    #[must_use]
    pub fn drag(&self, pointer: Point, bounds: &Bounds) -> Option<CropRegion> {
        self.active.map(|g| g.update(pointer, bounds))
    }

    /// End the active gesture. Returns `true` if one was running.
    pub fn release(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Abort the active gesture, returning the region it started from.
    pub fn cancel(&mut self) -> Option<CropRegion> {
        self.active.take().map(|g| g.start)
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The active gesture, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Size;

    const START: CropRegion = CropRegion::new(10.0, 10.0, 100.0, 100.0);

    fn bounds() -> Bounds {
        Bounds::new(Size::new(500.0, 500.0), 50.0)
    }

    fn drag_once(kind: GestureKind, start: CropRegion, delta: Delta) -> CropRegion {
        let mut c = GestureController::new();
        assert!(c.press(kind, Point::new(200.0, 200.0), start));
        c.drag(Point::new(200.0 + delta.dx, 200.0 + delta.dy), &bounds())
            .unwrap()
    }

    #[test]
    fn bottom_right_candidate_keeps_top_left() {
        let c = GestureKind::Resize(Handle::BottomRight).candidate(START, Delta::new(20.0, -10.0));
        assert_eq!(c, CropRegion::new(10.0, 10.0, 120.0, 90.0));
    }

    #[test]
    fn top_left_candidate_moves_origin() {
        let c = GestureKind::Resize(Handle::TopLeft).candidate(START, Delta::new(20.0, -10.0));
        assert_eq!(c, CropRegion::new(30.0, 0.0, 80.0, 110.0));
    }

    #[test]
    fn move_keeps_size_through_many_updates() {
        let b = bounds();
        let mut c = GestureController::new();
        c.press(GestureKind::Move, Point::new(0.0, 0.0), START);
        for (x, y) in [(5.0, 5.0), (-300.0, 40.0), (900.0, 900.0), (13.5, -2.0)] {
            let r = c.drag(Point::new(x, y), &b).unwrap();
            assert!((r.width - START.width).abs() < f64::EPSILON);
            assert!((r.height - START.height).abs() < f64::EPSILON);
            assert!(b.contains(&r));
        }
    }

    #[test]
    fn move_stops_at_edges() {
        let r = drag_once(GestureKind::Move, START, Delta::new(-50.0, 1000.0));
        assert_eq!(r, CropRegion::new(0.0, 400.0, 100.0, 100.0));
    }

    #[test]
    fn bottom_right_shrink_stops_at_minimum() {
        let r = drag_once(
            GestureKind::Resize(Handle::BottomRight),
            START,
            Delta::new(-10_000.0, -10_000.0),
        );
        assert_eq!(r, CropRegion::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn top_left_shrink_stops_at_minimum_with_far_corner_fixed() {
        let r = drag_once(
            GestureKind::Resize(Handle::TopLeft),
            START,
            Delta::new(10_000.0, 10_000.0),
        );
        assert_eq!(r, CropRegion::new(60.0, 60.0, 50.0, 50.0));
        assert!((r.right() - START.right()).abs() < f64::EPSILON);
    }

    #[test]
    fn top_left_grow_stops_at_image_origin_with_far_corner_fixed() {
        let r = drag_once(
            GestureKind::Resize(Handle::TopLeft),
            START,
            Delta::new(-100.0, -100.0),
        );
        assert_eq!(r, CropRegion::new(0.0, 0.0, 110.0, 110.0));
    }

    #[test]
    fn bottom_right_grow_stops_at_image_edge_without_moving_origin() {
        let start = CropRegion::new(300.0, 300.0, 100.0, 100.0);
        let r = drag_once(
            GestureKind::Resize(Handle::BottomRight),
            start,
            Delta::new(500.0, 50.0),
        );
        assert_eq!(r, CropRegion::new(300.0, 300.0, 200.0, 150.0));
    }

    #[test]
    fn second_press_is_ignored_while_active() {
        let mut c = GestureController::new();
        assert!(c.press(GestureKind::Move, Point::new(0.0, 0.0), START));
        assert!(!c.press(
            GestureKind::Resize(Handle::TopLeft),
            Point::new(50.0, 50.0),
            START
        ));
        assert_eq!(c.active().unwrap().kind, GestureKind::Move);
    }

    #[test]
    fn drag_while_idle_does_nothing() {
        let c = GestureController::new();
        assert!(c.drag(Point::new(10.0, 10.0), &bounds()).is_none());
    }

    #[test]
    fn release_ends_gesture() {
        let mut c = GestureController::new();
        c.press(GestureKind::Move, Point::new(0.0, 0.0), START);
        assert!(c.release());
        assert!(!c.is_active());
        assert!(!c.release());
    }

    #[test]
    fn cancel_returns_start_region() {
        let mut c = GestureController::new();
        c.press(GestureKind::Resize(Handle::BottomRight), Point::new(0.0, 0.0), START);
        assert_eq!(c.cancel(), Some(START));
        assert_eq!(c.cancel(), None);
    }
}
