// SPDX-License-Identifier: MPL-2.0
//! Outward notifications emitted by an overlay session.
//!
//! Notifications are queued on the session and drained by the host with
//! `OverlaySession::take_notifications`, in the order they were produced.

use super::actions::ActionButton;
use crate::media::ImageModel;
use crate::ui::navigation::NavigationEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The gallery moved to another image.
    Navigate(NavigationEvent),
    /// The close button was used.
    Close { image: Option<ImageModel> },
    /// A custom action ran, from a click or its keyboard shortcut.
    CustomButtonClick {
        button_id: String,
        /// Image shown when the action was triggered, before its handler ran.
        image: Option<ImageModel>,
        button: ActionButton,
    },
}

impl Notification {
    /// Event name as seen by host-page listeners.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Navigate(_) => "navigate",
            Self::Close { .. } => "close",
            Self::CustomButtonClick { .. } => "customButtonClick",
        }
    }
}
