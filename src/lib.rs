// SPDX-License-Identifier: MPL-2.0
//! `lens_overlay` is the interactive core of an overlay image viewer.
//!
//! It shows a single image or a cyclical gallery in a modal layer drawn by a host
//! display surface, and handles zoom, pan, pinch, press-and-hold zoom buttons,
//! keyboard/touch navigation and custom action buttons. Rendering is delegated to
//! a [`ui::overlay::DisplaySurface`] implementation.

#![doc(html_root_url = "https://docs.rs/lens_overlay/0.1.0")]

/// Emits a `log` record only when the overlay runs with debug diagnostics enabled.
macro_rules! debug_log {
    ($enabled:expr, $level:ident, $($arg:tt)+) => {
        if $enabled {
            log::$level!($($arg)+);
        }
    };
}

pub mod config;
pub mod error;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
