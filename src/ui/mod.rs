// SPDX-License-Identifier: MPL-2.0
//! Interactive core of the overlay and its state management.
//!
//! # Components
//!
//! - [`geometry`] - Pure scale, pan and sizing computations
//! - [`state`] - Zoom, drag, swipe and gallery state owned by a session
//! - [`gesture`] - Classifies pointer, touch and wheel input into gestures
//! - [`navigation`] - Gallery cycling and navigation events
//! - [`scheduler`] - Cancellable tasks driven by the host clock
//! - [`overlay`] - Session lifecycle, action buttons and the display surface

pub mod geometry;
pub mod gesture;
pub mod navigation;
pub mod overlay;
pub mod scheduler;
pub mod state;
