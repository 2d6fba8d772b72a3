// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag panning of a zoomed image. Movement is accumulated
//! incrementally: each move adds the delta since the previous position.

use super::zoom::ZoomState;
use crate::ui::geometry::PanLayout;
use iced_core::Point;

impl ZoomState {
    /// Starts a drag at `position`.
    pub fn start_drag(&mut self, position: Point) {
        self.is_dragging = true;
        self.last_position = position;
    }

    /// Pans by the pointer movement since the last position, constrained to the
    /// zoomed image. Returns `false` when no drag is active.
    pub fn drag_to(&mut self, position: Point, layout: PanLayout) -> bool {
        if !self.is_dragging {
            return false;
        }

        let delta = position - self.last_position;
        self.translate = self.translate + delta;
        self.last_position = position;
        self.constrain(layout);
        true
    }

    /// Stops the drag. Returns whether a drag was active.
    pub fn stop_drag(&mut self) -> bool {
        std::mem::replace(&mut self.is_dragging, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced_core::{Size, Vector};

    fn zoomed() -> ZoomState {
        ZoomState {
            scale: 2.0,
            ..ZoomState::default()
        }
    }

    fn layout() -> PanLayout {
        PanLayout::fitted(Size::new(800.0, 600.0))
    }

    #[test]
    fn default_state_is_not_dragging() {
        let mut state = ZoomState::default();
        assert!(!state.is_dragging);
        assert!(!state.drag_to(Point::new(10.0, 10.0), layout()));
        assert_eq!(state.translate, Vector::new(0.0, 0.0));
    }

    #[test]
    fn drag_accumulates_incremental_deltas() {
        let mut state = zoomed();
        state.start_drag(Point::new(100.0, 100.0));

        assert!(state.drag_to(Point::new(120.0, 90.0), layout()));
        assert_eq!(state.translate, Vector::new(20.0, -10.0));

        assert!(state.drag_to(Point::new(125.0, 95.0), layout()));
        assert_eq!(state.translate, Vector::new(25.0, -5.0));
        assert_eq!(state.last_position, Point::new(125.0, 95.0));
    }

    #[test]
    fn drag_is_clamped_to_image_edges() {
        let mut state = zoomed();
        state.start_drag(Point::new(0.0, 0.0));
        state.drag_to(Point::new(1000.0, -1000.0), layout());

        assert_eq!(state.translate, Vector::new(200.0, -150.0));
    }

    #[test]
    fn stop_drag_reports_previous_state() {
        let mut state = zoomed();
        assert!(!state.stop_drag());

        state.start_drag(Point::new(5.0, 5.0));
        assert!(state.stop_drag());
        assert!(!state.is_dragging);
    }
}
