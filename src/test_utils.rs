// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

use crate::media::ImageModel;
use std::time::{Duration, Instant};

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-5;

/// Builds a gallery of `count` images named `image-0.png`, `image-1.png`, ...
pub fn gallery(count: usize) -> Vec<ImageModel> {
    (0..count)
        .map(|i| ImageModel::new(format!("image-{i}.png"), format!("Image {i}")))
        .collect()
}

/// Returns `start` advanced by `millis` milliseconds.
pub fn at(start: Instant, millis: u64) -> Instant {
    start + Duration::from_millis(millis)
}
