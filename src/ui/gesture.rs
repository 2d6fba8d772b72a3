// SPDX-License-Identifier: MPL-2.0
//! Gesture interpreter: turns raw pointer, touch and wheel input into zoom,
//! pan and navigation changes.
//!
//! The interpreter mutates the session's [`ZoomState`] and reports what the
//! session has to do next through an [`Effect`], following the same
//! handle-then-effect shape as the rest of the UI state.
//!
//! ## Phases
//!
//! ```text
//! idle ──pointer/touch down on zoomed image──▶ dragging ──release──▶ idle (+50ms click suppression)
//! idle ──two touch points on zoom surface────▶ pinching ──< 2 touches──▶ idle
//! idle ──press on zoom button────────────────▶ press-hold ──global release──▶ idle
//! ```

use crate::config::{DRAG_CLICK_SUPPRESSION, PRESS_HOLD_DELAY, PRESS_HOLD_REPEAT, ZOOM_STEP};
use crate::ui::geometry::{PanLayout, ScaleBounds};
use crate::ui::navigation::Direction;
use crate::ui::scheduler::Scheduler;
use crate::ui::state::{SwipeTracker, ZoomAction, ZoomState};
use iced_core::keyboard::{Key, Modifiers};
use iced_core::mouse::ScrollDelta;
use iced_core::Point;
use std::time::Instant;

/// Element of the overlay an input event landed on.
///
/// Hosts resolve their own hit-testing into one of these; the overlay only asks
/// capability questions of it and never inspects any element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionTarget {
    /// The zoomable image itself.
    Image,
    /// The zoom container around the image.
    ZoomSurface,
    /// One of the zoom buttons inside the zoom container.
    ZoomButton(ZoomAction),
    /// A custom action button, by id.
    CustomButton(String),
    CloseButton,
    GalleryButton(Direction),
    Backdrop,
    /// Any other overlay element.
    Chrome,
}

impl InteractionTarget {
    /// Zoom button action carried by the target, if any.
    #[must_use]
    pub fn zoom_action(&self) -> Option<ZoomAction> {
        match self {
            Self::ZoomButton(action) => Some(*action),
            _ => None,
        }
    }

    /// Whether the target lies inside the zoom container.
    #[must_use]
    pub fn is_zoom_surface(&self) -> bool {
        matches!(self, Self::Image | Self::ZoomSurface | Self::ZoomButton(_))
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }
}

/// Raw input delivered by the host.
///
/// Pointer and touch positions are in viewport pixels. Releases are global: the
/// host reports them even when they happen outside the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerPressed {
        target: InteractionTarget,
        position: Point,
    },
    PointerMoved {
        position: Point,
    },
    PointerReleased,
    TouchStarted {
        target: InteractionTarget,
        touches: Vec<Point>,
    },
    TouchMoved {
        target: InteractionTarget,
        touches: Vec<Point>,
    },
    /// `remaining` are the touches still down, `changed` the ones just lifted.
    TouchEnded {
        remaining: Vec<Point>,
        changed: Vec<Point>,
    },
    WheelScrolled {
        target: InteractionTarget,
        delta: ScrollDelta,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Clicked {
        target: InteractionTarget,
    },
}

/// Tasks the interpreter schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Initial delay before a held zoom button starts repeating.
    PressHoldDelay(ZoomAction),
    /// Repeating step of a held zoom button.
    PressHoldRepeat(ZoomAction),
    /// End of the click suppression that follows a drag.
    ClearDragSuppression,
}

/// Coarse phase of the interpreter, derived from the zoom state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Pinching,
    PressHold(ZoomAction),
}

/// What the session must do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Scale, offset or cursor changed; re-apply the image transform.
    TransformChanged,
    /// A swipe asked for gallery navigation.
    Navigate(Direction),
}

/// Session data the interpreter reads and the scheduler it writes.
pub struct GestureContext<'a> {
    pub bounds: ScaleBounds,
    pub layout: PanLayout,
    pub gallery_mode: bool,
    pub now: Instant,
    pub scheduler: &'a mut Scheduler<TimerKind>,
}

/// Classifies input into drag, pinch, press-and-hold, wheel zoom and swipe.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    swipe: SwipeTracker,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(zoom: &ZoomState) -> GesturePhase {
        if let Some(action) = zoom.active_press {
            GesturePhase::PressHold(action)
        } else if zoom.is_pinching {
            GesturePhase::Pinching
        } else if zoom.is_dragging {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    /// Drops any partially tracked swipe.
    pub fn reset(&mut self) {
        self.swipe.cancel();
    }

    /// Handles one input event. Keyboard and click events are not gestures and
    /// produce [`Effect::None`].
    pub fn handle(
        &mut self,
        zoom: &mut ZoomState,
        event: &InputEvent,
        ctx: &mut GestureContext<'_>,
    ) -> Effect {
        match event {
            InputEvent::WheelScrolled { target, delta } => wheel(zoom, target, *delta, ctx),
            InputEvent::PointerPressed { target, position } => {
                if let Some(action) = target.zoom_action() {
                    return begin_press(zoom, action, ctx);
                }
                if target.is_image() && zoom.is_zoomed() {
                    zoom.start_drag(*position);
                    return Effect::TransformChanged;
                }
                Effect::None
            }
            InputEvent::PointerMoved { position } => {
                if zoom.drag_to(*position, ctx.layout) {
                    Effect::TransformChanged
                } else {
                    Effect::None
                }
            }
            InputEvent::PointerReleased => {
                release_press(zoom, ctx);
                if finish_drag(zoom, ctx) {
                    Effect::TransformChanged
                } else {
                    Effect::None
                }
            }
            InputEvent::TouchStarted { target, touches } => {
                self.touch_started(zoom, target, touches, ctx)
            }
            InputEvent::TouchMoved { target, touches } => touch_moved(zoom, target, touches, ctx),
            InputEvent::TouchEnded { remaining, changed } => {
                self.touch_ended(zoom, remaining, changed, ctx)
            }
            InputEvent::KeyPressed { .. } | InputEvent::Clicked { .. } => Effect::None,
        }
    }

    /// Handles a task that came due.
    pub fn timer_fired(
        &mut self,
        zoom: &mut ZoomState,
        kind: TimerKind,
        ctx: &mut GestureContext<'_>,
    ) -> Effect {
        match kind {
            TimerKind::PressHoldDelay(action) => {
                if zoom.active_press == Some(action) {
                    zoom.press_task = Some(ctx.scheduler.schedule_repeating(
                        TimerKind::PressHoldRepeat(action),
                        ctx.now,
                        PRESS_HOLD_REPEAT,
                    ));
                }
                Effect::None
            }
            TimerKind::PressHoldRepeat(action) => {
                if zoom.active_press == Some(action) {
                    zoom.apply_action(action, ctx.bounds, ctx.layout);
                    Effect::TransformChanged
                } else {
                    Effect::None
                }
            }
            TimerKind::ClearDragSuppression => {
                zoom.was_dragging = false;
                zoom.release_task = None;
                Effect::None
            }
        }
    }

    fn touch_started(
        &mut self,
        zoom: &mut ZoomState,
        target: &InteractionTarget,
        touches: &[Point],
        ctx: &mut GestureContext<'_>,
    ) -> Effect {
        if let Some(action) = target.zoom_action() {
            self.swipe.cancel();
            return begin_press(zoom, action, ctx);
        }

        // A touch that pans the zoomed image is not a swipe.
        let pans = target.is_zoom_surface() && zoom.is_zoomed();
        match touches {
            [start] if ctx.gallery_mode && !pans => self.swipe.begin(*start),
            _ => self.swipe.cancel(),
        }

        if !target.is_zoom_surface() {
            return Effect::None;
        }

        match touches {
            [a, b] => {
                zoom.start_pinch(*a, *b);
                Effect::TransformChanged
            }
            [position] if zoom.is_zoomed() => {
                zoom.start_drag(*position);
                Effect::TransformChanged
            }
            _ => Effect::None,
        }
    }

    fn touch_ended(
        &mut self,
        zoom: &mut ZoomState,
        remaining: &[Point],
        changed: &[Point],
        ctx: &mut GestureContext<'_>,
    ) -> Effect {
        release_press(zoom, ctx);

        if remaining.len() < 2 {
            zoom.end_pinch();
        }
        let drag_ended = remaining.is_empty() && finish_drag(zoom, ctx);

        let swipe = match changed {
            [end] if ctx.gallery_mode && remaining.is_empty() => self.swipe.finish(*end),
            _ => {
                self.swipe.cancel();
                None
            }
        };

        match swipe {
            Some(direction) => Effect::Navigate(direction),
            None if drag_ended => Effect::TransformChanged,
            None => Effect::None,
        }
    }
}

fn wheel(
    zoom: &mut ZoomState,
    target: &InteractionTarget,
    delta: ScrollDelta,
    ctx: &GestureContext<'_>,
) -> Effect {
    if !target.is_zoom_surface() {
        return Effect::None;
    }

    let direction = scroll_direction(delta);
    if direction == 0.0 {
        return Effect::None;
    }

    zoom.zoom_by(direction * ZOOM_STEP, ctx.bounds, ctx.layout);
    Effect::TransformChanged
}

/// Sign of a wheel event: `1.0` zooms in (wheel away from the user), `-1.0` zooms out.
fn scroll_direction(delta: ScrollDelta) -> f32 {
    let y = match delta {
        ScrollDelta::Lines { y, .. } | ScrollDelta::Pixels { y, .. } => y,
    };
    if y > 0.0 {
        1.0
    } else if y < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn touch_moved(
    zoom: &mut ZoomState,
    target: &InteractionTarget,
    touches: &[Point],
    ctx: &GestureContext<'_>,
) -> Effect {
    if !target.is_zoom_surface() {
        return Effect::None;
    }

    match touches {
        [a, b] if zoom.is_pinching => {
            zoom.pinch_to(*a, *b, ctx.bounds, ctx.layout);
            Effect::TransformChanged
        }
        [position] if zoom.drag_to(*position, ctx.layout) => Effect::TransformChanged,
        _ => Effect::None,
    }
}

/// Applies one immediate step and arms the delay before continuous zooming.
fn begin_press(zoom: &mut ZoomState, action: ZoomAction, ctx: &mut GestureContext<'_>) -> Effect {
    if let Some(handle) = zoom.press_task.take() {
        ctx.scheduler.cancel(handle);
    }

    zoom.active_press = Some(action);
    zoom.apply_action(action, ctx.bounds, ctx.layout);
    zoom.press_task = Some(ctx.scheduler.schedule_once(
        TimerKind::PressHoldDelay(action),
        ctx.now,
        PRESS_HOLD_DELAY,
    ));
    Effect::TransformChanged
}

/// Stops press-and-hold zooming. Returns whether a button was held.
fn release_press(zoom: &mut ZoomState, ctx: &mut GestureContext<'_>) -> bool {
    if let Some(handle) = zoom.press_task.take() {
        ctx.scheduler.cancel(handle);
    }
    zoom.active_press.take().is_some()
}

/// Ends a drag and suppresses the click the release synthesizes.
fn finish_drag(zoom: &mut ZoomState, ctx: &mut GestureContext<'_>) -> bool {
    if !zoom.stop_drag() {
        return false;
    }

    zoom.was_dragging = true;
    if let Some(handle) = zoom.release_task.take() {
        ctx.scheduler.cancel(handle);
    }
    zoom.release_task = Some(ctx.scheduler.schedule_once(
        TimerKind::ClearDragSuppression,
        ctx.now,
        DRAG_CLICK_SUPPRESSION,
    ));
    true
}
