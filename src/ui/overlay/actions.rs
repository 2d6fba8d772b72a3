// SPDX-License-Identifier: MPL-2.0
//! Caller-supplied action buttons and their keyboard shortcuts.

use crate::media::ImageModel;
use crate::ui::overlay::OverlayControl;
use iced_core::keyboard::key::Named;
use iced_core::keyboard::{Key, Modifiers};
use std::fmt;
use std::rc::Rc;

/// Invoked with the current image and a handle to the session that owns the button.
pub type ActionHandler = Rc<dyn Fn(Option<&ImageModel>, &mut dyn OverlayControl)>;

/// Keyboard shortcut bound to an action button.
///
/// `key` is compared case-insensitively. `ctrl` is satisfied by either Ctrl or
/// the platform logo key (Cmd on macOS). Modifiers must match exactly: a
/// shortcut without `shift` does not fire while Shift is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyShortcut {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyShortcut {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[must_use]
    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Whether a key press triggers this shortcut.
    #[must_use]
    pub fn matches(&self, key: &Key, modifiers: Modifiers) -> bool {
        let Some(pressed) = key_name(key) else {
            return false;
        };
        if pressed.to_lowercase() != self.key.to_lowercase() {
            return false;
        }

        let ctrl_pressed = modifiers.control() || modifiers.logo();
        ctrl_pressed == self.ctrl && modifiers.shift() == self.shift && modifiers.alt() == self.alt
    }
}

/// Name of a key as written in shortcut descriptors.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_string()),
        Key::Named(named) => named_key(*named).map(str::to_owned),
        Key::Unidentified => None,
    }
}

fn named_key(named: Named) -> Option<&'static str> {
    Some(match named {
        Named::Enter => "Enter",
        Named::Escape => "Escape",
        Named::Space => " ",
        Named::Tab => "Tab",
        Named::Backspace => "Backspace",
        Named::Delete => "Delete",
        Named::Insert => "Insert",
        Named::Home => "Home",
        Named::End => "End",
        Named::PageUp => "PageUp",
        Named::PageDown => "PageDown",
        Named::ArrowUp => "ArrowUp",
        Named::ArrowDown => "ArrowDown",
        Named::ArrowLeft => "ArrowLeft",
        Named::ArrowRight => "ArrowRight",
        Named::F1 => "F1",
        Named::F2 => "F2",
        Named::F3 => "F3",
        Named::F4 => "F4",
        Named::F5 => "F5",
        Named::F6 => "F6",
        Named::F7 => "F7",
        Named::F8 => "F8",
        Named::F9 => "F9",
        Named::F10 => "F10",
        Named::F11 => "F11",
        Named::F12 => "F12",
        _ => return None,
    })
}

/// A custom button shown next to the close button.
#[derive(Clone)]
pub struct ActionButton {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub title: Option<String>,
    pub custom_classes: Vec<String>,
    /// Whether the button stays available in read-only mode.
    pub visible_read_only: bool,
    pub shortcut: Option<KeyShortcut>,
    pub handler: Option<ActionHandler>,
}

impl ActionButton {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            title: None,
            custom_classes: Vec::new(),
            visible_read_only: true,
            shortcut: None,
            handler: None,
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.custom_classes.push(class.into());
        self
    }

    #[must_use]
    pub fn hidden_in_read_only(mut self) -> Self {
        self.visible_read_only = false;
        self
    }

    #[must_use]
    pub fn shortcut(mut self, shortcut: KeyShortcut) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    #[must_use]
    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(Option<&ImageModel>, &mut dyn OverlayControl) + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    /// Whether the button is shown given the session's read-only flag.
    #[must_use]
    pub fn is_available(&self, read_only: bool) -> bool {
        !read_only || self.visible_read_only
    }
}

impl fmt::Debug for ActionButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionButton")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("title", &self.title)
            .field("custom_classes", &self.custom_classes)
            .field("visible_read_only", &self.visible_read_only)
            .field("shortcut", &self.shortcut)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

impl PartialEq for ActionButton {
    /// Handlers are compared by identity.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.icon == other.icon
            && self.title == other.title
            && self.custom_classes == other.custom_classes
            && self.visible_read_only == other.visible_read_only
            && self.shortcut == other.shortcut
            && match (&self.handler, &other.handler) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn plain_shortcut_matches_either_case() {
        let shortcut = KeyShortcut::new("d");
        assert!(shortcut.matches(&character("d"), Modifiers::empty()));
        assert!(shortcut.matches(&character("D"), Modifiers::empty()));
        assert!(!shortcut.matches(&character("e"), Modifiers::empty()));
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let shortcut = KeyShortcut::new("s").ctrl();
        assert!(shortcut.matches(&character("s"), Modifiers::CTRL));
        assert!(!shortcut.matches(&character("s"), Modifiers::empty()));
        assert!(!shortcut.matches(&character("s"), Modifiers::CTRL | Modifiers::SHIFT));

        let plain = KeyShortcut::new("s");
        assert!(!plain.matches(&character("s"), Modifiers::ALT));
    }

    #[test]
    fn logo_key_counts_as_ctrl() {
        let shortcut = KeyShortcut::new("s").ctrl();
        assert!(shortcut.matches(&character("s"), Modifiers::LOGO));
    }

    #[test]
    fn named_keys_use_their_names() {
        let shortcut = KeyShortcut::new("enter").shift();
        assert!(shortcut.matches(&Key::Named(Named::Enter), Modifiers::SHIFT));
        assert!(!shortcut.matches(&Key::Named(Named::Escape), Modifiers::SHIFT));
        assert!(!shortcut.matches(&Key::Unidentified, Modifiers::SHIFT));
    }

    #[test]
    fn hidden_buttons_are_unavailable_in_read_only_mode() {
        let shown = ActionButton::new("share", "Share");
        let hidden = ActionButton::new("delete", "Delete").hidden_in_read_only();

        assert!(shown.is_available(true));
        assert!(hidden.is_available(false));
        assert!(!hidden.is_available(true));
    }

    #[test]
    fn builder_collects_presentation_fields() {
        let button = ActionButton::new("edit", "Edit")
            .icon("fa-pen")
            .title("Edit image")
            .class("primary")
            .shortcut(KeyShortcut::new("e").alt());

        assert_eq!(button.icon.as_deref(), Some("fa-pen"));
        assert_eq!(button.title.as_deref(), Some("Edit image"));
        assert_eq!(button.custom_classes, vec!["primary".to_string()]);
        assert_eq!(button.shortcut, Some(KeyShortcut::new("e").alt()));
        assert!(button.handler.is_none());
    }
}
