// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! This module contains the state owned by an overlay session, kept apart from
//! the session itself so each piece can be reasoned about and tested alone.

pub mod drag;
pub mod gallery;
pub mod swipe;
pub mod zoom;

// Re-export commonly used types for convenience
pub use gallery::GalleryState;
pub use swipe::SwipeTracker;
pub use zoom::{ZoomAction, ZoomState};
