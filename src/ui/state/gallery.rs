// SPDX-License-Identifier: MPL-2.0
//! Gallery state management
//!
//! Holds the image sequence of a gallery session and the cyclic cursor into it.

use crate::media::ImageModel;
use crate::ui::navigation::Direction;

/// Images of the current gallery and the selected index.
///
/// While `gallery_mode` is set, `images` is non-empty and
/// `current_index < images.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryState {
    images: Vec<ImageModel>,
    current_index: usize,
    gallery_mode: bool,
}

impl GalleryState {
    /// Starts a gallery session. Returns `None` for an empty sequence; an
    /// out-of-range `active_index` selects the first image.
    #[must_use]
    pub fn start(images: Vec<ImageModel>, active_index: usize) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        let current_index = if active_index < images.len() {
            active_index
        } else {
            0
        };
        Some(Self {
            images,
            current_index,
            gallery_mode: true,
        })
    }

    /// Moves one step in `direction`, wrapping at both ends.
    /// Returns whether the step wrapped around.
    pub fn step(&mut self, direction: Direction) -> bool {
        let len = self.images.len();
        if !self.gallery_mode || len == 0 {
            return false;
        }
        let previous = self.current_index;
        self.current_index = match direction {
            Direction::Next => (previous + 1) % len,
            Direction::Previous => (previous + len - 1) % len,
        };
        match direction {
            Direction::Next => previous == len - 1,
            Direction::Previous => previous == 0,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gallery_mode
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current(&self) -> Option<&ImageModel> {
        self.images.get(self.current_index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
