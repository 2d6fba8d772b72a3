// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the overlay. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Scale bounds and the discrete zoom step
//! - **Gestures**: Press-and-hold timings, drag click suppression, swipe threshold
//! - **Sizing**: Device breakpoints, modal bounds and fallbacks for intelligent sizing
//! - **Overlay**: Chrome labels and the transform transition hint

use std::time::Duration;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Default lower scale bound (1.0 = image at its displayed size).
pub const DEFAULT_MIN_SCALE: f32 = 1.0;

/// Default upper scale bound.
pub const DEFAULT_MAX_SCALE: f32 = 5.0;

/// Additive scale change applied by one wheel notch or one zoom button step (5%).
pub const ZOOM_STEP: f32 = 0.05;

/// Scale restored by the reset zoom button.
pub const RESET_SCALE: f32 = 1.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Delay between the first press-and-hold step and the start of continuous zooming.
pub const PRESS_HOLD_DELAY: Duration = Duration::from_millis(300);

/// Interval between continuous zoom steps while a zoom button stays pressed.
pub const PRESS_HOLD_REPEAT: Duration = Duration::from_millis(100);

/// How long the click synthesized by a drag release stays suppressed.
pub const DRAG_CLICK_SUPPRESSION: Duration = Duration::from_millis(50);

/// Minimum horizontal travel (in pixels) for a touch to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

// ==========================================================================
// Sizing Defaults
// ==========================================================================

/// Viewports at most this wide (in pixels) use the mobile sizing rules.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Vertical space reserved for buttons and padding on mobile.
pub const MOBILE_RESERVED_HEIGHT_PX: f32 = 120.0;

/// Vertical space reserved for buttons and padding on desktop.
pub const DESKTOP_RESERVED_HEIGHT_PX: f32 = 100.0;

/// Share of the viewport width the modal may use.
pub const MODAL_WIDTH_RATIO: f32 = 0.95;

/// Hard cap on the modal width on desktop.
pub const DESKTOP_MAX_MODAL_WIDTH_PX: f32 = 1400.0;

/// Share of the viewport height the modal may use on mobile.
pub const MOBILE_HEIGHT_RATIO: f32 = 0.85;

/// Share of the viewport height the modal may use on desktop.
pub const DESKTOP_HEIGHT_RATIO: f32 = 0.95;

/// Floor applied to very small images on mobile.
pub const MOBILE_MIN_DIMENSION_PX: f32 = 200.0;

/// Floor applied to very small images on desktop.
pub const DESKTOP_MIN_DIMENSION_PX: f32 = 300.0;

/// Aspect ratios this close to 1.0 are classified as square.
pub const SQUARE_TOLERANCE: f32 = 0.1;

/// Display width used when the natural image size cannot be determined.
pub const FALLBACK_WIDTH_PX: f32 = 600.0;

/// Display height used when the natural image size cannot be determined.
pub const FALLBACK_HEIGHT_PX: f32 = 400.0;

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Default label of the close button.
pub const DEFAULT_CLOSE_LABEL: &str = "Close";

/// Alt text used when an image does not provide one.
pub const DEFAULT_ALT_TEXT: &str = "Gallery image";

/// Duration of the transition hint attached to every transform update.
pub const TRANSFORM_TRANSITION: Duration = Duration::from_millis(100);

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Zoom validation
    assert!(DEFAULT_MIN_SCALE > 0.0);
    assert!(DEFAULT_MIN_SCALE <= RESET_SCALE);
    assert!(DEFAULT_MAX_SCALE >= RESET_SCALE);
    assert!(ZOOM_STEP > 0.0);

    // Gesture validation
    assert!(PRESS_HOLD_DELAY.as_millis() > PRESS_HOLD_REPEAT.as_millis());
    assert!(PRESS_HOLD_REPEAT.as_millis() > 0);
    assert!(DRAG_CLICK_SUPPRESSION.as_millis() > 0);
    assert!(SWIPE_THRESHOLD_PX > 0.0);

    // Sizing validation
    assert!(MODAL_WIDTH_RATIO > 0.0 && MODAL_WIDTH_RATIO <= 1.0);
    assert!(MOBILE_HEIGHT_RATIO > 0.0 && MOBILE_HEIGHT_RATIO <= 1.0);
    assert!(DESKTOP_HEIGHT_RATIO > 0.0 && DESKTOP_HEIGHT_RATIO <= 1.0);
    assert!(MOBILE_MIN_DIMENSION_PX < DESKTOP_MIN_DIMENSION_PX);
    assert!(FALLBACK_WIDTH_PX > FALLBACK_HEIGHT_PX);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_defaults_bracket_reset_scale() {
        assert_eq!(DEFAULT_MIN_SCALE, 1.0);
        assert_eq!(DEFAULT_MAX_SCALE, 5.0);
        assert!(DEFAULT_MIN_SCALE <= RESET_SCALE && RESET_SCALE <= DEFAULT_MAX_SCALE);
    }

    #[test]
    fn press_hold_timings_match_interaction_design() {
        assert_eq!(PRESS_HOLD_DELAY, Duration::from_millis(300));
        assert_eq!(PRESS_HOLD_REPEAT, Duration::from_millis(100));
        assert_eq!(DRAG_CLICK_SUPPRESSION, Duration::from_millis(50));
    }

    #[test]
    fn fallback_size_is_landscape() {
        assert_eq!(FALLBACK_WIDTH_PX / FALLBACK_HEIGHT_PX, 1.5);
    }
}
