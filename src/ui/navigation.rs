// SPDX-License-Identifier: MPL-2.0
//! Navigation controller for single images and cyclical galleries.
//!
//! This module owns which image the overlay shows. Keyboard, swipe and chevron
//! navigation all end up in [`NavigationController::navigate`], so cycling rules
//! live in one place.

use crate::media::ImageModel;
use crate::ui::state::GalleryState;

/// Direction of a gallery step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "prev",
        }
    }
}

/// Describes one completed gallery step.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEvent {
    pub direction: Direction,
    /// Whether the step wrapped from the last image to the first or vice versa.
    pub cycled: bool,
    pub previous_image: ImageModel,
    pub previous_index: usize,
    pub current_image: ImageModel,
    pub current_index: usize,
    pub gallery_length: usize,
}

/// Gallery position for chrome such as a "2 / 5" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryPosition {
    pub index: usize,
    pub total: usize,
}

/// Tracks the shown image and, in gallery mode, the gallery it belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationController {
    gallery: GalleryState,
    single: Option<ImageModel>,
}

impl NavigationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows one image outside of gallery mode.
    pub fn show_single(&mut self, image: ImageModel) {
        self.gallery = GalleryState::default();
        self.single = Some(image);
    }

    /// Starts a gallery session.
    ///
    /// Returns `false`, leaving the current state untouched, when `images` is
    /// empty. An out-of-range `active_index` falls back to the first image.
    pub fn show_gallery(&mut self, images: Vec<ImageModel>, active_index: usize) -> bool {
        match GalleryState::start(images, active_index) {
            Some(gallery) => {
                self.gallery = gallery;
                self.single = None;
                true
            }
            None => false,
        }
    }

    /// Steps through the gallery, wrapping at both ends.
    ///
    /// Returns `None` outside of gallery mode.
    pub fn navigate(&mut self, direction: Direction) -> Option<NavigationEvent> {
        if !self.gallery.is_active() {
            return None;
        }

        let previous_index = self.gallery.current_index();
        let previous_image = self.gallery.current()?.clone();
        let cycled = self.gallery.step(direction);
        let current_image = self.gallery.current()?.clone();

        Some(NavigationEvent {
            direction,
            cycled,
            previous_image,
            previous_index,
            current_image,
            current_index: self.gallery.current_index(),
            gallery_length: self.gallery.len(),
        })
    }

    /// Forgets the current image and gallery.
    pub fn clear(&mut self) {
        self.gallery = GalleryState::default();
        self.single = None;
    }

    #[must_use]
    pub fn current_image(&self) -> Option<&ImageModel> {
        if self.gallery.is_active() {
            self.gallery.current()
        } else {
            self.single.as_ref()
        }
    }

    /// Index of the current image; always 0 outside of gallery mode.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.gallery.current_index()
    }

    #[must_use]
    pub fn is_gallery_mode(&self) -> bool {
        self.gallery.is_active()
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    #[must_use]
    pub fn position(&self) -> Option<GalleryPosition> {
        self.gallery.is_active().then(|| GalleryPosition {
            index: self.gallery.current_index(),
            total: self.gallery.len(),
        })
    }
}
