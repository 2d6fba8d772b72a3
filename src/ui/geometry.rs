// SPDX-License-Identifier: MPL-2.0
//! Pure geometry for zooming, panning and sizing the displayed image.
//!
//! Every function here is side-effect free; the gesture interpreter and the
//! overlay session feed them the current state and store the results.

use crate::config::{
    DESKTOP_HEIGHT_RATIO, DESKTOP_MAX_MODAL_WIDTH_PX, DESKTOP_MIN_DIMENSION_PX,
    DESKTOP_RESERVED_HEIGHT_PX, FALLBACK_HEIGHT_PX, FALLBACK_WIDTH_PX, MOBILE_BREAKPOINT_PX,
    MOBILE_HEIGHT_RATIO, MOBILE_MIN_DIMENSION_PX, MOBILE_RESERVED_HEIGHT_PX, MODAL_WIDTH_RATIO,
    SQUARE_TOLERANCE,
};
use iced_core::{Point, Size, Vector};

/// Inclusive scale range of a session.
///
/// Unlike `f32::clamp`, clamping never panics when a caller configures
/// `min > max`; the upper bound wins in that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f32,
    pub max: f32,
}

impl ScaleBounds {
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps `scale` into the range.
    #[must_use]
    pub fn clamp(self, scale: f32) -> f32 {
        clamp_scale(scale, self.min, self.max)
    }
}

/// Sizes used to bound panning: the image box before scaling and the box clipping it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanLayout {
    pub image: Size,
    pub container: Size,
}

impl PanLayout {
    #[must_use]
    pub fn new(image: Size, container: Size) -> Self {
        Self { image, container }
    }

    /// Layout where the container is sized exactly to the image, as after intelligent sizing.
    #[must_use]
    pub fn fitted(size: Size) -> Self {
        Self::new(size, size)
    }
}

/// Linear clamp of a proposed scale.
#[must_use]
pub fn clamp_scale(proposed: f32, min: f32, max: f32) -> f32 {
    proposed.max(min).min(max)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f32 {
    a.distance(b)
}

/// Scale for a pinch whose fingers are `current_distance` apart, relative to the baseline.
///
/// A zero (or otherwise unusable) baseline distance leaves the scale at `initial_scale`.
#[must_use]
pub fn pinch_scale(
    current_distance: f32,
    initial_distance: f32,
    initial_scale: f32,
    bounds: ScaleBounds,
) -> f32 {
    if initial_distance <= 0.0 || !initial_distance.is_finite() || !current_distance.is_finite() {
        return initial_scale;
    }
    bounds.clamp(initial_scale * (current_distance / initial_distance))
}

/// Clamps a pan offset so the zoomed image never uncovers empty space past its edges.
///
/// Offsets are expressed in pre-scale pixels, matching a `scale(..) translate(..)`
/// transform. At `scale <= 1` the image cannot be panned at all.
#[must_use]
pub fn constrain_pan(scale: f32, translate: Vector, layout: PanLayout) -> Vector {
    if scale <= 1.0 {
        return Vector::new(0.0, 0.0);
    }

    let max_x = max_translate(layout.image.width, layout.container.width, scale);
    let max_y = max_translate(layout.image.height, layout.container.height, scale);

    Vector::new(
        translate.x.max(-max_x).min(max_x),
        translate.y.max(-max_y).min(max_y),
    )
}

fn max_translate(displayed: f32, container: f32, scale: f32) -> f32 {
    ((displayed * scale - container) / 2.0 / scale).max(0.0)
}

/// Orientation class of a displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectClass {
    Landscape,
    Portrait,
    Square,
}

impl AspectClass {
    /// Classifies an aspect ratio (width / height). Near-square ratios win over
    /// landscape/portrait.
    #[must_use]
    pub fn from_ratio(aspect_ratio: f32) -> Self {
        if (aspect_ratio - 1.0).abs() < SQUARE_TOLERANCE {
            Self::Square
        } else if aspect_ratio > 1.0 {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Style hook the host may attach to the overlay content.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Landscape => "landscape-image",
            Self::Portrait => "portrait-image",
            Self::Square => "square-image",
        }
    }
}

/// Display size computed for an image by [`optimal_dimensions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayDimensions {
    pub width: f32,
    pub height: f32,
    pub aspect_ratio: f32,
    pub aspect_class: AspectClass,
}

impl DisplayDimensions {
    /// Size used when the natural dimensions of an image cannot be obtained.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            width: FALLBACK_WIDTH_PX,
            height: FALLBACK_HEIGHT_PX,
            aspect_ratio: FALLBACK_WIDTH_PX / FALLBACK_HEIGHT_PX,
            aspect_class: AspectClass::Landscape,
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Modal bounds for one device class.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ModalBounds {
    max_width: f32,
    max_height: f32,
    min_dimension: f32,
}

impl ModalBounds {
    fn for_viewport(viewport: Size) -> Self {
        if viewport.width <= MOBILE_BREAKPOINT_PX {
            Self {
                max_width: viewport.width * MODAL_WIDTH_RATIO,
                max_height: viewport.height * MOBILE_HEIGHT_RATIO - MOBILE_RESERVED_HEIGHT_PX,
                min_dimension: MOBILE_MIN_DIMENSION_PX,
            }
        } else {
            Self {
                max_width: (viewport.width * MODAL_WIDTH_RATIO).min(DESKTOP_MAX_MODAL_WIDTH_PX),
                max_height: viewport.height * DESKTOP_HEIGHT_RATIO - DESKTOP_RESERVED_HEIGHT_PX,
                min_dimension: DESKTOP_MIN_DIMENSION_PX,
            }
        }
    }
}

/// Computes the size at which an image of `natural` size is shown in `viewport`.
///
/// The result never upscales past the natural size except to honor the minimum
/// dimension floor, preserves the aspect ratio, and stays inside the modal bounds
/// of the viewport's device class. Unusable natural sizes yield
/// [`DisplayDimensions::fallback`].
#[must_use]
pub fn optimal_dimensions(natural: Size, viewport: Size) -> DisplayDimensions {
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(natural.width) || !usable(natural.height) {
        return DisplayDimensions::fallback();
    }

    let aspect = natural.width / natural.height;
    let bounds = ModalBounds::for_viewport(viewport);

    let (mut width, mut height);
    if aspect > 1.0 {
        width = bounds.max_width.min(natural.width);
        height = width / aspect;
        if height > bounds.max_height {
            height = bounds.max_height;
            width = height * aspect;
        }
    } else {
        height = bounds.max_height.min(natural.height);
        width = height * aspect;
        if width > bounds.max_width {
            width = bounds.max_width;
            height = width / aspect;
        }
    }

    if width < bounds.min_dimension && height < bounds.min_dimension {
        if aspect > 1.0 {
            width = bounds.min_dimension;
            height = bounds.min_dimension / aspect;
        } else {
            height = bounds.min_dimension;
            width = bounds.min_dimension * aspect;
        }
    }

    DisplayDimensions {
        width: width.round(),
        height: height.round(),
        aspect_ratio: aspect,
        aspect_class: AspectClass::from_ratio(aspect),
    }
}

/// Transform applied to the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    pub scale: f32,
    pub translate: Vector,
    pub cursor: CursorHint,
}

impl ImageTransform {
    /// CSS `transform` value: scale first, then the pre-scale translation.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.scale, self.translate.x, self.translate.y
        )
    }
}

/// Pointer cursor suggested for the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grab,
    Grabbing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    fn layout(width: f32, height: f32) -> PanLayout {
        PanLayout::fitted(Size::new(width, height))
    }

    #[test]
    fn clamp_scale_stays_within_bounds() {
        for proposed in [-10.0, 0.0, 0.5, 1.0, 2.5, 5.0, 7.0, 1e9] {
            let scale = clamp_scale(proposed, 1.0, 5.0);
            assert!((1.0..=5.0).contains(&scale), "{proposed} -> {scale}");
        }
        assert_eq!(clamp_scale(2.5, 1.0, 5.0), 2.5);
    }

    #[test]
    fn clamp_scale_tolerates_inverted_bounds() {
        assert_eq!(ScaleBounds::new(3.0, 2.0).clamp(10.0), 2.0);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_abs_diff_eq!(
            distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)),
            5.0,
            epsilon = F32_EPSILON
        );
    }

    #[test]
    fn pinch_at_baseline_reproduces_initial_scale() {
        let bounds = ScaleBounds::new(1.0, 5.0);
        assert_eq!(pinch_scale(120.0, 120.0, 2.3, bounds), 2.3);
    }

    #[test]
    fn pinch_scales_relative_to_baseline_and_clamps() {
        let bounds = ScaleBounds::new(1.0, 5.0);
        assert_abs_diff_eq!(pinch_scale(200.0, 100.0, 1.5, bounds), 3.0, epsilon = F32_EPSILON);
        assert_eq!(pinch_scale(1000.0, 100.0, 1.5, bounds), 5.0);
        assert_eq!(pinch_scale(10.0, 100.0, 1.5, bounds), 1.0);
    }

    #[test]
    fn pinch_with_zero_baseline_keeps_initial_scale() {
        assert_eq!(pinch_scale(50.0, 0.0, 1.7, ScaleBounds::new(1.0, 5.0)), 1.7);
    }

    #[test]
    fn constrain_pan_zeroes_offset_when_not_zoomed() {
        for scale in [0.5, 1.0] {
            let result = constrain_pan(scale, Vector::new(250.0, -80.0), layout(800.0, 600.0));
            assert_eq!(result, Vector::new(0.0, 0.0));
        }
    }

    #[test]
    fn constrain_pan_clamps_to_uncovered_edges() {
        // 800x600 at 2x inside an 800x600 box: (1600 - 800) / 2 / 2 = 200, (1200 - 600) / 4 = 150
        let result = constrain_pan(2.0, Vector::new(500.0, -500.0), layout(800.0, 600.0));
        assert_abs_diff_eq!(result.x, 200.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(result.y, -150.0, epsilon = F32_EPSILON);

        let inside = constrain_pan(2.0, Vector::new(50.0, 20.0), layout(800.0, 600.0));
        assert_eq!(inside, Vector::new(50.0, 20.0));
    }

    #[test]
    fn constrain_pan_never_allows_panning_inside_a_larger_container() {
        let wide_container = PanLayout::new(Size::new(200.0, 100.0), Size::new(1000.0, 1000.0));
        let result = constrain_pan(2.0, Vector::new(30.0, 30.0), wide_container);
        assert_eq!(result, Vector::new(0.0, 0.0));
    }

    #[test]
    fn landscape_image_is_bound_by_width_on_desktop() {
        let dims = optimal_dimensions(Size::new(4000.0, 2000.0), Size::new(1920.0, 1080.0));
        // max width = min(1824, 1400) = 1400, height = 700 <= 926
        assert_eq!(dims.width, 1400.0);
        assert_eq!(dims.height, 700.0);
        assert_eq!(dims.aspect_class, AspectClass::Landscape);
    }

    #[test]
    fn landscape_image_falls_back_to_height_bound() {
        let dims = optimal_dimensions(Size::new(3000.0, 2000.0), Size::new(1920.0, 800.0));
        // max height = 760 - 100 = 660, width = 990
        assert_eq!(dims.height, 660.0);
        assert_eq!(dims.width, 990.0);
    }

    #[test]
    fn portrait_image_is_bound_by_height_on_mobile() {
        let dims = optimal_dimensions(Size::new(1000.0, 2000.0), Size::new(400.0, 800.0));
        // max height = 680 - 120 = 560, width = 280 <= 380
        assert_eq!(dims.height, 560.0);
        assert_eq!(dims.width, 280.0);
        assert_eq!(dims.aspect_class, AspectClass::Portrait);
    }

    #[test]
    fn small_images_are_raised_to_minimum_dimension() {
        let dims = optimal_dimensions(Size::new(100.0, 50.0), Size::new(1920.0, 1080.0));
        assert_eq!(dims.width, 300.0);
        assert_eq!(dims.height, 150.0);

        let mobile = optimal_dimensions(Size::new(50.0, 100.0), Size::new(375.0, 812.0));
        assert_eq!(mobile.height, 200.0);
        assert_eq!(mobile.width, 100.0);
    }

    #[test]
    fn near_square_ratios_classify_as_square() {
        let dims = optimal_dimensions(Size::new(1050.0, 1000.0), Size::new(1920.0, 1080.0));
        assert_eq!(dims.aspect_class, AspectClass::Square);
        assert_eq!(dims.aspect_class.class_name(), "square-image");
    }

    #[test]
    fn unusable_natural_size_yields_fallback() {
        let dims = optimal_dimensions(Size::new(0.0, 0.0), Size::new(1920.0, 1080.0));
        assert_eq!(dims, DisplayDimensions::fallback());
        assert_eq!(dims.width, 600.0);
        assert_eq!(dims.height, 400.0);
        assert_eq!(dims.aspect_ratio, 1.5);
    }

    #[test]
    fn transform_css_applies_scale_before_translation() {
        let transform = ImageTransform {
            scale: 2.0,
            translate: Vector::new(10.0, -5.5),
            cursor: CursorHint::Grab,
        };
        assert_eq!(transform.css(), "scale(2) translate(10px, -5.5px)");
    }
}
