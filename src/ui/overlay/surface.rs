// SPDX-License-Identifier: MPL-2.0
//! Display surface abstraction.
//!
//! The overlay core never touches a widget tree. It describes what to draw with
//! an [`OverlayFrame`], pushes transform and size updates, and asks the surface
//! for natural image sizes and viewport dimensions. Hosts implement
//! [`DisplaySurface`] on top of their toolkit; [`HeadlessSurface`] records every
//! call and backs the demo binary and tests.

use crate::error::{Error, Result};
use crate::media::ImageModel;
use crate::ui::geometry::{DisplayDimensions, ImageTransform};
use crate::ui::navigation::GalleryPosition;
use iced_core::Size;
use std::time::Duration;

/// Identifies one natural-size lookup. Answers carrying an outdated ticket are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizingTicket(pub(crate) u64);

/// Asks the host for the natural size of the image at `url`.
///
/// The host answers later with `OverlaySession::complete_sizing(ticket, ..)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingRequest {
    pub ticket: SizingTicket,
    pub url: String,
}

/// Input listener a session installs on its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Clicks, pointer, touch and wheel input on the overlay container.
    ContainerInput,
    /// Key presses anywhere in the host.
    DocumentKeyDown,
    /// Pointer releases anywhere in the host, ending press-and-hold and drags.
    DocumentPointerUp,
    /// Touch ends anywhere in the host.
    DocumentTouchEnd,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 4] = [
        ListenerKind::ContainerInput,
        ListenerKind::DocumentKeyDown,
        ListenerKind::DocumentPointerUp,
        ListenerKind::DocumentTouchEnd,
    ];
}

/// Registration handle returned by [`DisplaySurface::register_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A custom action button as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedButton {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub title: Option<String>,
    pub custom_classes: Vec<String>,
}

/// Everything needed to draw the overlay for the current image.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub image: ImageModel,
    pub alt: String,
    pub transform: ImageTransform,
    /// Duration of the transform transition hint.
    pub transition: Duration,
    pub buttons: Vec<RenderedButton>,
    pub close_label: String,
    /// Present in gallery mode; both chevrons are always drawn since navigation cycles.
    pub gallery: Option<GalleryPosition>,
}

/// Rendering and input backend of an overlay session.
pub trait DisplaySurface {
    /// Current viewport size in pixels.
    fn viewport_size(&self) -> Size;

    /// Draws the overlay, replacing any previous frame.
    fn render(&mut self, frame: &OverlayFrame);

    /// Applies scale, translation and cursor to the displayed image.
    fn apply_transform(&mut self, transform: &ImageTransform);

    /// Sizes the image container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] when no rendered image container exists.
    fn apply_dimensions(&mut self, dimensions: &DisplayDimensions) -> Result<()>;

    /// Starts a natural-size lookup for an image.
    fn request_natural_size(&mut self, request: SizingRequest);

    /// Removes the rendered overlay.
    fn clear(&mut self);

    fn register_listener(&mut self, kind: ListenerKind) -> ListenerId;

    fn unregister_listener(&mut self, id: ListenerId);

    /// Called once when the owning session is destroyed.
    fn detach(&mut self);
}

/// A [`DisplaySurface`] that records what it is asked to do.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    viewport: Size,
    frame: Option<OverlayFrame>,
    pub frames: Vec<OverlayFrame>,
    pub transforms: Vec<ImageTransform>,
    pub dimensions: Vec<DisplayDimensions>,
    pub sizing_requests: Vec<SizingRequest>,
    listeners: Vec<(ListenerId, ListenerKind)>,
    next_listener: u64,
    pub clear_count: usize,
    pub detached: bool,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            frame: None,
            frames: Vec::new(),
            transforms: Vec::new(),
            dimensions: Vec::new(),
            sizing_requests: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
            clear_count: 0,
            detached: false,
        }
    }

    /// Frame currently on screen.
    #[must_use]
    pub fn current_frame(&self) -> Option<&OverlayFrame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn last_transform(&self) -> Option<&ImageTransform> {
        self.transforms.last()
    }

    #[must_use]
    pub fn last_sizing_request(&self) -> Option<&SizingRequest> {
        self.sizing_requests.last()
    }

    /// Listener kinds currently registered, in registration order.
    #[must_use]
    pub fn active_listeners(&self) -> Vec<ListenerKind> {
        self.listeners.iter().map(|(_, kind)| *kind).collect()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Size::new(1280.0, 800.0))
    }
}

impl DisplaySurface for HeadlessSurface {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn render(&mut self, frame: &OverlayFrame) {
        self.frame = Some(frame.clone());
        self.frames.push(frame.clone());
    }

    fn apply_transform(&mut self, transform: &ImageTransform) {
        if let Some(frame) = self.frame.as_mut() {
            frame.transform = *transform;
        }
        self.transforms.push(*transform);
    }

    fn apply_dimensions(&mut self, dimensions: &DisplayDimensions) -> Result<()> {
        if self.frame.is_none() {
            return Err(Error::MissingElement("image container"));
        }
        self.dimensions.push(*dimensions);
        Ok(())
    }

    fn request_natural_size(&mut self, request: SizingRequest) {
        self.sizing_requests.push(request);
    }

    fn clear(&mut self) {
        self.frame = None;
        self.clear_count += 1;
    }

    fn register_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, kind));
        id
    }

    fn unregister_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(registered, _)| *registered != id);
    }

    fn detach(&mut self) {
        self.frame = None;
        self.detached = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::geometry::CursorHint;
    use iced_core::Vector;

    fn frame() -> OverlayFrame {
        OverlayFrame {
            image: ImageModel::new("a.png", "A"),
            alt: "A".to_string(),
            transform: ImageTransform {
                scale: 1.0,
                translate: Vector::new(0.0, 0.0),
                cursor: CursorHint::Default,
            },
            transition: Duration::from_millis(100),
            buttons: Vec::new(),
            close_label: "Close".to_string(),
            gallery: None,
        }
    }

    #[test]
    fn dimensions_need_a_rendered_frame() {
        let mut surface = HeadlessSurface::default();
        let result = surface.apply_dimensions(&DisplayDimensions::fallback());
        assert!(matches!(result, Err(Error::MissingElement(_))));

        surface.render(&frame());
        assert!(surface.apply_dimensions(&DisplayDimensions::fallback()).is_ok());
        assert_eq!(surface.dimensions.len(), 1);
    }

    #[test]
    fn transform_updates_current_frame() {
        let mut surface = HeadlessSurface::default();
        surface.render(&frame());
        let zoomed = ImageTransform {
            scale: 2.0,
            translate: Vector::new(5.0, 0.0),
            cursor: CursorHint::Grab,
        };
        surface.apply_transform(&zoomed);

        assert_eq!(surface.current_frame().map(|f| f.transform), Some(zoomed));
    }

    #[test]
    fn listeners_register_and_unregister() {
        let mut surface = HeadlessSurface::default();
        let key = surface.register_listener(ListenerKind::DocumentKeyDown);
        let up = surface.register_listener(ListenerKind::DocumentPointerUp);
        assert_ne!(key, up);

        surface.unregister_listener(key);
        assert_eq!(surface.active_listeners(), vec![ListenerKind::DocumentPointerUp]);
    }
}
