// SPDX-License-Identifier: MPL-2.0
//! Image descriptors handed to the overlay by its host.
//!
//! The overlay treats images as opaque values: it never decodes pixels itself.
//! Natural dimensions are obtained by the display surface, optionally with the
//! help of [`probe`].

pub mod probe;

use crate::config::DEFAULT_ALT_TEXT;
use std::collections::BTreeMap;

/// An image shown by the overlay.
///
/// `data` carries caller values (ids, captions, ...) that travel untouched
/// through notifications and action handlers. Values are strings so the model
/// stays `Eq` and `Debug`; hosts with richer payloads keep them on their side
/// and store a key here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageModel {
    /// Location the display surface loads the image from.
    pub url: String,
    /// Alternative text; may be empty.
    pub alt: String,
    /// Opaque caller data.
    pub data: BTreeMap<String, String>,
}

impl ImageModel {
    /// Creates an image descriptor without caller data.
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            data: BTreeMap::new(),
        }
    }

    /// Attaches a caller value to the descriptor.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Alt text to render, falling back to a generic label when none was given.
    #[must_use]
    pub fn display_alt(&self) -> &str {
        if self.alt.trim().is_empty() {
            DEFAULT_ALT_TEXT
        } else {
            &self.alt
        }
    }
}
