// SPDX-License-Identifier: MPL-2.0
//! Overlay session: show/hide lifecycle and the wiring between input, state and
//! the display surface.
//!
//! An [`OverlaySession`] owns all mutable state of one overlay instance. The host
//! feeds it input with [`OverlaySession::handle_input`], drives its timers with
//! [`OverlaySession::tick`], answers its natural-size lookups with
//! [`OverlaySession::complete_sizing`], and drains outward notifications with
//! [`OverlaySession::take_notifications`].
//!
//! # Lifecycle
//!
//! Construction registers the session's listeners on the surface and
//! [`OverlaySession::destroy`] (also run on drop) removes exactly those.

pub mod actions;
pub mod notifications;
pub mod surface;

pub use actions::{ActionButton, ActionHandler, KeyShortcut};
pub use notifications::Notification;
pub use surface::{
    DisplaySurface, HeadlessSurface, ListenerId, ListenerKind, OverlayFrame, RenderedButton,
    SizingRequest, SizingTicket,
};

use crate::config::{ConfigPatch, OverlayConfig, TRANSFORM_TRANSITION};
use crate::error::Result;
use crate::media::ImageModel;
use crate::ui::geometry::{optimal_dimensions, DisplayDimensions, PanLayout};
use crate::ui::gesture::{
    Effect, GestureContext, GestureInterpreter, InputEvent, InteractionTarget, TimerKind,
};
use crate::ui::navigation::{Direction, GalleryPosition, NavigationController};
use crate::ui::scheduler::Scheduler;
use crate::ui::state::ZoomState;
use iced_core::keyboard::key::Named;
use iced_core::keyboard::{Key, Modifiers};
use iced_core::Size;
use std::collections::VecDeque;
use std::time::Instant;

/// Session operations available to action button handlers.
pub trait OverlayControl {
    fn show(&mut self, image: ImageModel);
    fn show_gallery(&mut self, images: Vec<ImageModel>, active_index: usize) -> bool;
    fn hide(&mut self);
    fn navigate(&mut self, direction: Direction) -> bool;
    fn set_read_only(&mut self, read_only: bool) -> bool;
    fn toggle_read_only(&mut self) -> bool;
    fn is_visible(&self) -> bool;
    fn current_image(&self) -> Option<&ImageModel>;
}

/// One overlay instance bound to a display surface.
pub struct OverlaySession<S: DisplaySurface> {
    config: OverlayConfig,
    surface: S,
    navigation: NavigationController,
    zoom: ZoomState,
    gestures: GestureInterpreter,
    scheduler: Scheduler<TimerKind>,
    visible: bool,
    layout: Option<PanLayout>,
    dimensions: Option<DisplayDimensions>,
    pending_sizing: Option<SizingTicket>,
    next_ticket: u64,
    listeners: Vec<ListenerId>,
    notifications: VecDeque<Notification>,
    destroyed: bool,
}

impl<S: DisplaySurface> OverlaySession<S> {
    /// Creates a hidden session and registers its listeners on `surface`.
    pub fn new(mut surface: S, config: OverlayConfig) -> Self {
        let listeners = ListenerKind::ALL
            .iter()
            .map(|kind| surface.register_listener(*kind))
            .collect();

        debug_log!(
            config.debug,
            debug,
            "overlay session created with {} action button(s)",
            config.buttons.len()
        );

        Self {
            config,
            surface,
            navigation: NavigationController::new(),
            zoom: ZoomState::default(),
            gestures: GestureInterpreter::new(),
            scheduler: Scheduler::new(),
            visible: false,
            layout: None,
            dimensions: None,
            pending_sizing: None,
            next_ticket: 0,
            listeners,
            notifications: VecDeque::new(),
            destroyed: false,
        }
    }

    /// Shows a single image.
    pub fn show(&mut self, image: ImageModel) {
        if self.destroyed {
            return;
        }
        debug_log!(self.config.debug, debug, "showing image {}", image.url);

        self.reset_interaction();
        self.navigation.show_single(image);
        self.visible = true;
        self.render();
    }

    /// Shows `images` as a cyclical gallery starting at `active_index`.
    ///
    /// An empty gallery is ignored and returns `false`; an out-of-range index
    /// starts at the first image.
    pub fn show_gallery(&mut self, images: Vec<ImageModel>, active_index: usize) -> bool {
        if self.destroyed {
            return false;
        }
        if images.is_empty() {
            debug_log!(self.config.debug, warn, "show_gallery called without images");
            return false;
        }
        if active_index >= images.len() {
            debug_log!(
                self.config.debug,
                warn,
                "active index {} out of range for {} image(s), starting at 0",
                active_index,
                images.len()
            );
        }

        self.reset_interaction();
        if !self.navigation.show_gallery(images, active_index) {
            return false;
        }
        self.visible = true;
        debug_log!(
            self.config.debug,
            debug,
            "showing gallery of {} image(s) at index {}",
            self.navigation.gallery().len(),
            self.navigation.current_index()
        );
        self.render();
        true
    }

    /// Hides the overlay and forgets the current image and gallery.
    pub fn hide(&mut self) {
        debug_log!(self.config.debug, debug, "hiding overlay");
        self.visible = false;
        self.navigation.clear();
        self.reset_interaction();
        self.surface.clear();
    }

    /// Moves through the gallery. Returns `false` outside of gallery mode.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Some(event) = self.navigation.navigate(direction) else {
            return false;
        };
        debug_log!(
            self.config.debug,
            debug,
            "gallery navigation {}: {} -> {} (cycled: {})",
            direction.as_str(),
            event.previous_index,
            event.current_index,
            event.cycled
        );

        self.reset_interaction();
        self.render();

        if let Some(callback) = self.config.on_image_switch.clone() {
            callback(&event);
        }
        self.notifications.push_back(Notification::Navigate(event));
        true
    }

    /// Merges `patch` into the live configuration and re-renders when visible.
    pub fn update_config(&mut self, patch: ConfigPatch) {
        self.config.apply(patch);
        let layout = self.pan_layout();
        self.zoom
            .set_scale(self.zoom.scale, self.config.scale_bounds(), layout);
        if self.visible {
            self.render();
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) -> bool {
        self.config.read_only = read_only;
        if self.visible {
            self.render();
        }
        self.config.read_only
    }

    pub fn toggle_read_only(&mut self) -> bool {
        self.set_read_only(!self.config.read_only)
    }

    /// Handles one input event at `now`.
    ///
    /// Returns whether the event changed the overlay. Input is ignored while the
    /// overlay is hidden.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        if self.destroyed || !self.visible {
            return false;
        }

        match event {
            InputEvent::KeyPressed { key, modifiers } => self.handle_key(&key, modifiers),
            InputEvent::Clicked { target } => self.handle_click(&target),
            event => {
                let layout = self.pan_layout();
                let mut ctx = GestureContext {
                    bounds: self.config.scale_bounds(),
                    layout,
                    gallery_mode: self.navigation.is_gallery_mode(),
                    now,
                    scheduler: &mut self.scheduler,
                };
                let effect = self.gestures.handle(&mut self.zoom, &event, &mut ctx);
                self.apply_effect(effect)
            }
        }
    }

    /// Runs every task due at `now`.
    pub fn tick(&mut self, now: Instant) {
        while let Some((_, kind)) = self.scheduler.pop_due(now) {
            let layout = self.pan_layout();
            let mut ctx = GestureContext {
                bounds: self.config.scale_bounds(),
                layout,
                gallery_mode: self.navigation.is_gallery_mode(),
                now,
                scheduler: &mut self.scheduler,
            };
            let effect = self.gestures.timer_fired(&mut self.zoom, kind, &mut ctx);
            self.apply_effect(effect);
        }
    }

    /// When the host should call [`Self::tick`] next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Answers a natural-size lookup and sizes the image container.
    ///
    /// A failed lookup falls back to the fixed fallback size. A missing image
    /// container only skips sizing. Answers to superseded requests are ignored.
    pub fn complete_sizing(&mut self, ticket: SizingTicket, natural: Result<Size>) {
        if self.pending_sizing != Some(ticket) {
            debug_log!(self.config.debug, debug, "ignoring stale sizing result {:?}", ticket);
            return;
        }
        self.pending_sizing = None;

        let dimensions = match natural {
            Ok(natural) => optimal_dimensions(natural, self.surface.viewport_size()),
            Err(error) => {
                debug_log!(
                    self.config.debug,
                    warn,
                    "could not read natural image size ({}), using fallback size",
                    error
                );
                DisplayDimensions::fallback()
            }
        };

        if let Err(error) = self.surface.apply_dimensions(&dimensions) {
            debug_log!(self.config.debug, error, "intelligent sizing skipped: {}", error);
            return;
        }
        debug_log!(
            self.config.debug,
            debug,
            "sized image to {}x{} ({})",
            dimensions.width,
            dimensions.height,
            dimensions.aspect_class.class_name()
        );

        self.dimensions = Some(dimensions);
        self.set_layout(PanLayout::fitted(dimensions.size()));
    }

    /// Overrides the displayed image and container sizes used to constrain panning.
    pub fn set_layout(&mut self, layout: PanLayout) {
        self.layout = Some(layout);
        self.zoom.constrain(layout);
        if self.visible {
            self.surface.apply_transform(&self.zoom.transform());
        }
    }

    /// Drains queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Action buttons available in the current read-only mode.
    pub fn visible_buttons(&self) -> impl Iterator<Item = &ActionButton> + '_ {
        let read_only = self.config.read_only;
        self.config
            .buttons
            .iter()
            .filter(move |button| button.is_available(read_only))
    }

    /// Hides the overlay, cancels pending tasks and releases every listener
    /// registered at construction. Later calls do nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.hide();
        self.scheduler.cancel_all();
        for id in self.listeners.drain(..) {
            self.surface.unregister_listener(id);
        }
        self.surface.detach();
        self.destroyed = true;
        debug_log!(self.config.debug, debug, "overlay session destroyed");
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    #[must_use]
    pub fn is_gallery_mode(&self) -> bool {
        self.navigation.is_gallery_mode()
    }

    #[must_use]
    pub fn current_image(&self) -> Option<&ImageModel> {
        self.navigation.current_image()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigation.current_index()
    }

    #[must_use]
    pub fn gallery_position(&self) -> Option<GalleryPosition> {
        self.navigation.position()
    }

    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[must_use]
    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<DisplayDimensions> {
        self.dimensions
    }

    #[must_use]
    pub fn pending_sizing(&self) -> Option<SizingTicket> {
        self.pending_sizing
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Layout bounding the pan offset. Until sizing lands (or when it was skipped)
    /// the image is assumed to fill the viewport.
    fn pan_layout(&self) -> PanLayout {
        self.layout
            .unwrap_or_else(|| PanLayout::fitted(self.surface.viewport_size()))
    }

    /// Clears zoom, gesture and sizing state for a new image or a hidden overlay.
    fn reset_interaction(&mut self) {
        self.zoom.reset(&mut self.scheduler);
        self.gestures.reset();
        self.layout = None;
        self.dimensions = None;
        self.pending_sizing = None;
    }

    fn apply_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::TransformChanged => {
                if self.visible {
                    self.surface.apply_transform(&self.zoom.transform());
                }
                true
            }
            Effect::Navigate(direction) => self.navigate(direction),
        }
    }

    fn handle_key(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        let shortcut = self
            .visible_buttons()
            .find(|button| {
                button
                    .shortcut
                    .as_ref()
                    .is_some_and(|shortcut| shortcut.matches(key, modifiers))
            })
            .cloned();
        if let Some(button) = shortcut {
            debug_log!(self.config.debug, debug, "shortcut triggered action {}", button.id);
            self.trigger_action(button);
            return true;
        }

        match key {
            Key::Named(Named::ArrowLeft) if self.navigation.is_gallery_mode() => {
                self.navigate(Direction::Previous)
            }
            Key::Named(Named::ArrowRight) if self.navigation.is_gallery_mode() => {
                self.navigate(Direction::Next)
            }
            Key::Named(Named::Escape) => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, target: &InteractionTarget) -> bool {
        // Zoom buttons act on press and release only.
        if target.zoom_action().is_some() {
            return true;
        }

        if self.zoom.was_dragging {
            debug_log!(self.config.debug, debug, "ignoring click that ended a drag");
            self.zoom.was_dragging = false;
            if let Some(handle) = self.zoom.release_task.take() {
                self.scheduler.cancel(handle);
            }
            return true;
        }

        match target {
            InteractionTarget::CustomButton(id) => {
                let button = self.visible_buttons().find(|button| button.id == *id).cloned();
                match button {
                    Some(button) => {
                        self.trigger_action(button);
                        true
                    }
                    None => {
                        debug_log!(self.config.debug, warn, "click on unknown action button {}", id);
                        false
                    }
                }
            }
            InteractionTarget::CloseButton => {
                self.close();
                true
            }
            InteractionTarget::GalleryButton(direction) => self.navigate(*direction),
            InteractionTarget::Backdrop => {
                self.hide();
                true
            }
            InteractionTarget::Image
            | InteractionTarget::ZoomSurface
            | InteractionTarget::ZoomButton(_)
            | InteractionTarget::Chrome => false,
        }
    }

    /// Runs an action's handler, then reports it with the image shown beforehand.
    fn trigger_action(&mut self, button: ActionButton) {
        let image = self.navigation.current_image().cloned();
        if let Some(handler) = button.handler.clone() {
            handler(image.as_ref(), self);
        }
        self.notifications.push_back(Notification::CustomButtonClick {
            button_id: button.id.clone(),
            image,
            button,
        });
    }

    fn close(&mut self) {
        let image = self.navigation.current_image().cloned();
        match (self.config.on_close.clone(), image.as_ref()) {
            (Some(on_close), Some(image)) => on_close(image),
            _ => debug_log!(self.config.debug, debug, "overlay closed"),
        }
        self.notifications.push_back(Notification::Close { image });
        self.hide();
    }

    fn render(&mut self) {
        let image = match self.navigation.current_image() {
            Some(image) if self.visible => image.clone(),
            _ => {
                self.surface.clear();
                return;
            }
        };

        let frame = OverlayFrame {
            alt: image.display_alt().to_string(),
            image,
            transform: self.zoom.transform(),
            transition: TRANSFORM_TRANSITION,
            buttons: self
                .visible_buttons()
                .map(|button| RenderedButton {
                    id: button.id.clone(),
                    label: button.label.clone(),
                    icon: button.icon.clone(),
                    title: button.title.clone(),
                    custom_classes: button.custom_classes.clone(),
                })
                .collect(),
            close_label: self.config.close_label.clone(),
            gallery: self.navigation.position(),
        };
        self.surface.render(&frame);
        self.request_sizing(frame.image.url);
    }

    fn request_sizing(&mut self, url: String) {
        let ticket = SizingTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_sizing = Some(ticket);
        self.surface
            .request_natural_size(SizingRequest { ticket, url });
    }
}

impl<S: DisplaySurface> OverlayControl for OverlaySession<S> {
    fn show(&mut self, image: ImageModel) {
        OverlaySession::show(self, image);
    }

    fn show_gallery(&mut self, images: Vec<ImageModel>, active_index: usize) -> bool {
        OverlaySession::show_gallery(self, images, active_index)
    }

    fn hide(&mut self) {
        OverlaySession::hide(self);
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        OverlaySession::navigate(self, direction)
    }

    fn set_read_only(&mut self, read_only: bool) -> bool {
        OverlaySession::set_read_only(self, read_only)
    }

    fn toggle_read_only(&mut self) -> bool {
        OverlaySession::toggle_read_only(self)
    }

    fn is_visible(&self) -> bool {
        OverlaySession::is_visible(self)
    }

    fn current_image(&self) -> Option<&ImageModel> {
        OverlaySession::current_image(self)
    }
}

impl<S: DisplaySurface> Drop for OverlaySession<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<S: DisplaySurface> std::fmt::Debug for OverlaySession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlaySession")
            .field("visible", &self.visible)
            .field("destroyed", &self.destroyed)
            .field("navigation", &self.navigation)
            .field("zoom", &self.zoom)
            .field("dimensions", &self.dimensions)
            .field("pending_sizing", &self.pending_sizing)
            .finish_non_exhaustive()
    }
}
