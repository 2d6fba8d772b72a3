// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! This module holds the transform of the displayed image and the transient
//! gesture data that drives it:
//! - Scale and pan offset
//! - Pinch baseline
//! - Active press-and-hold zoom button and its scheduled task
//! - Drag-release click suppression
//!
//! Drag bookkeeping lives in [`super::drag`].

use crate::config::{RESET_SCALE, ZOOM_STEP};
use crate::ui::geometry::{
    self, constrain_pan, CursorHint, ImageTransform, PanLayout, ScaleBounds,
};
use crate::ui::scheduler::{Scheduler, TaskHandle};
use iced_core::{Point, Vector};

/// Discrete zoom operations bound to the zoom buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomAction {
    ZoomIn,
    ZoomOut,
    Reset,
}

/// Transform and gesture state of the displayed image.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    /// Current scale, kept inside the session's scale bounds.
    pub scale: f32,

    /// Pan offset in pre-scale pixels.
    pub translate: Vector,

    /// Whether a drag is in progress.
    pub is_dragging: bool,

    /// Set for a short while after a drag ends so the synthesized click is ignored.
    pub was_dragging: bool,

    /// Last pointer position seen during the current drag.
    pub last_position: Point,

    /// Whether a two-finger pinch is in progress.
    pub is_pinching: bool,

    /// Finger distance when the pinch started.
    pub initial_distance: f32,

    /// Scale when the pinch started.
    pub initial_scale: f32,

    /// Zoom button currently held down.
    pub active_press: Option<ZoomAction>,

    /// Press-and-hold task: the initial delay, then the repeating step.
    pub press_task: Option<TaskHandle>,

    /// Task clearing `was_dragging`.
    pub release_task: Option<TaskHandle>,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: RESET_SCALE,
            translate: Vector::new(0.0, 0.0),
            is_dragging: false,
            was_dragging: false,
            last_position: Point::ORIGIN,
            is_pinching: false,
            initial_distance: 0.0,
            initial_scale: RESET_SCALE,
            active_press: None,
            press_task: None,
            release_task: None,
        }
    }
}

impl ZoomState {
    /// Returns to the initial state, cancelling any task this state scheduled.
    pub fn reset<K: Copy>(&mut self, scheduler: &mut Scheduler<K>) {
        for handle in [self.press_task.take(), self.release_task.take()]
            .into_iter()
            .flatten()
        {
            scheduler.cancel(handle);
        }
        *self = Self::default();
    }

    /// Whether the image is magnified enough to be panned.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    /// Sets the scale (clamped) and re-constrains the pan offset.
    pub fn set_scale(&mut self, scale: f32, bounds: ScaleBounds, layout: PanLayout) {
        self.scale = bounds.clamp(scale);
        self.constrain(layout);
    }

    /// Changes the scale by `delta`.
    pub fn zoom_by(&mut self, delta: f32, bounds: ScaleBounds, layout: PanLayout) {
        self.set_scale(self.scale + delta, bounds, layout);
    }

    /// Applies one step of a zoom button.
    pub fn apply_action(
        &mut self,
        action: ZoomAction,
        bounds: ScaleBounds,
        layout: PanLayout,
    ) {
        match action {
            ZoomAction::ZoomIn => self.zoom_by(ZOOM_STEP, bounds, layout),
            ZoomAction::ZoomOut => self.zoom_by(-ZOOM_STEP, bounds, layout),
            ZoomAction::Reset => {
                self.translate = Vector::new(0.0, 0.0);
                self.set_scale(RESET_SCALE, bounds, layout);
            }
        }
    }

    /// Captures the pinch baseline from the two touch points.
    pub fn start_pinch(&mut self, a: Point, b: Point) {
        self.is_pinching = true;
        self.is_dragging = false;
        self.initial_distance = geometry::distance(a, b);
        self.initial_scale = self.scale;
    }

    /// Rescales relative to the pinch baseline.
    pub fn pinch_to(&mut self, a: Point, b: Point, bounds: ScaleBounds, layout: PanLayout) {
        let scale = geometry::pinch_scale(
            geometry::distance(a, b),
            self.initial_distance,
            self.initial_scale,
            bounds,
        );
        self.set_scale(scale, bounds, layout);
    }

    pub fn end_pinch(&mut self) {
        self.is_pinching = false;
    }

    /// Keeps the pan offset inside the zoomed image.
    pub fn constrain(&mut self, layout: PanLayout) {
        self.translate = constrain_pan(self.scale, self.translate, layout);
    }

    /// Transform to apply to the displayed image.
    #[must_use]
    pub fn transform(&self) -> ImageTransform {
        let cursor = if self.is_dragging {
            CursorHint::Grabbing
        } else if self.is_zoomed() {
            CursorHint::Grab
        } else {
            CursorHint::Default
        };
        ImageTransform {
            scale: self.scale,
            translate: self.translate,
            cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};
    use iced_core::Size;
    use std::time::{Duration, Instant};

    fn bounds() -> ScaleBounds {
        ScaleBounds::new(1.0, 5.0)
    }

    fn layout() -> PanLayout {
        PanLayout::fitted(Size::new(800.0, 600.0))
    }

    #[test]
    fn default_zoom_state_is_identity() {
        let state = ZoomState::default();
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.translate, Vector::new(0.0, 0.0));
        assert!(!state.is_dragging && !state.was_dragging && !state.is_pinching);
        assert!(state.active_press.is_none());
        assert_eq!(state.transform().cursor, CursorHint::Default);
    }

    #[test]
    fn zoom_in_out_step_by_five_percent() {
        let mut state = ZoomState::default();
        state.apply_action(ZoomAction::ZoomIn, bounds(), layout());
        assert_abs_diff_eq!(state.scale, 1.05, epsilon = F32_EPSILON);

        state.apply_action(ZoomAction::ZoomOut, bounds(), layout());
        assert_abs_diff_eq!(state.scale, 1.0, epsilon = F32_EPSILON);

        state.apply_action(ZoomAction::ZoomOut, bounds(), layout());
        assert_eq!(state.scale, 1.0);
    }

    #[test]
    fn reset_action_restores_scale_and_zeroes_pan() {
        let mut state = ZoomState {
            scale: 3.0,
            translate: Vector::new(40.0, -20.0),
            ..ZoomState::default()
        };
        state.apply_action(ZoomAction::Reset, bounds(), layout());
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.translate, Vector::new(0.0, 0.0));
    }

    #[test]
    fn reset_action_respects_bounds_excluding_one() {
        let mut state = ZoomState::default();
        state.apply_action(ZoomAction::Reset, ScaleBounds::new(2.0, 4.0), layout());
        assert_eq!(state.scale, 2.0);
    }

    #[test]
    fn zooming_out_recenters_the_image() {
        let mut state = ZoomState {
            scale: 2.0,
            translate: Vector::new(100.0, 50.0),
            ..ZoomState::default()
        };
        state.set_scale(1.0, bounds(), layout());
        assert_eq!(state.translate, Vector::new(0.0, 0.0));
    }

    #[test]
    fn pinch_doubles_scale_when_fingers_spread_twice_as_far() {
        let mut state = ZoomState {
            scale: 1.5,
            ..ZoomState::default()
        };
        state.start_pinch(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(state.initial_scale, 1.5);
        assert_abs_diff_eq!(state.initial_distance, 100.0, epsilon = F32_EPSILON);

        state.pinch_to(Point::new(0.0, 0.0), Point::new(200.0, 0.0), bounds(), layout());
        assert_abs_diff_eq!(state.scale, 3.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn reset_cancels_scheduled_tasks() {
        let now = Instant::now();
        let mut scheduler = Scheduler::new();
        let mut state = ZoomState::default();
        state.press_task = Some(scheduler.schedule_once(1u8, now, Duration::from_millis(300)));
        state.release_task = Some(scheduler.schedule_once(2u8, now, Duration::from_millis(50)));

        state.reset(&mut scheduler);

        assert!(scheduler.is_empty());
        assert_eq!(state, ZoomState::default());
    }
}
