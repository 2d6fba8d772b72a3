// SPDX-License-Identifier: MPL-2.0
//! Swipe state management
//!
//! Tracks a single-finger touch from start to end and decides whether it was a
//! horizontal swipe. Vertical or short movements are left alone so the host can
//! treat them as taps or scrolling.

use crate::config::SWIPE_THRESHOLD_PX;
use crate::ui::navigation::Direction;
use iced_core::Point;

/// Classifies the movement from `start` to `end`.
///
/// Rightward swipes go to the previous image, leftward swipes to the next one.
#[must_use]
pub fn classify_swipe(start: Point, end: Point, threshold: f32) -> Option<Direction> {
    let delta = end - start;
    if delta.x.abs() > delta.y.abs() && delta.x.abs() > threshold {
        if delta.x > 0.0 {
            Some(Direction::Previous)
        } else {
            Some(Direction::Next)
        }
    } else {
        None
    }
}

/// Start point of the touch being tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    start: Option<Point>,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self {
            start: None,
            threshold: SWIPE_THRESHOLD_PX,
        }
    }
}

impl SwipeTracker {
    pub fn begin(&mut self, position: Point) {
        self.start = Some(position);
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Ends tracking at `position` and returns the swipe direction, if any.
    pub fn finish(&mut self, position: Point) -> Option<Direction> {
        let start = self.start.take()?;
        classify_swipe(start, position, self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(dx: f32, dy: f32) -> Option<Direction> {
        classify_swipe(
            Point::new(200.0, 200.0),
            Point::new(200.0 + dx, 200.0 + dy),
            SWIPE_THRESHOLD_PX,
        )
    }

    #[test]
    fn horizontal_swipes_navigate() {
        assert_eq!(swipe(80.0, 10.0), Some(Direction::Previous));
        assert_eq!(swipe(-80.0, 10.0), Some(Direction::Next));
    }

    #[test]
    fn short_or_vertical_movements_do_not_navigate() {
        assert_eq!(swipe(30.0, 0.0), None);
        assert_eq!(swipe(50.0, 0.0), None);
        assert_eq!(swipe(60.0, 90.0), None);
    }

    #[test]
    fn tracker_requires_a_start_point() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.finish(Point::new(0.0, 0.0)), None);

        tracker.begin(Point::new(300.0, 100.0));
        assert!(tracker.is_tracking());
        assert_eq!(tracker.finish(Point::new(200.0, 110.0)), Some(Direction::Next));
        assert!(!tracker.is_tracking());
    }
}
