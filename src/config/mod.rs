// SPDX-License-Identifier: MPL-2.0
//! This module handles the overlay's configuration: the optional `settings.toml`
//! file with zoom and chrome defaults, and the runtime [`OverlayConfig`] built from it.
//!
//! # Configuration Sections
//!
//! - `[zoom]` - Scale bounds
//! - `[overlay]` - Read-only mode, close button label and debug diagnostics
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path
//! 2. Set `LENS_OVERLAY_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! The overlay never writes this file; it only reads defaults from it.
//!
//! # Examples
//!
//! ```no_run
//! use lens_overlay::config::{self, ConfigPatch, OverlayConfig};
//!
//! let settings = config::load().unwrap_or_default();
//! let mut config = OverlayConfig::from(settings);
//!
//! config.apply(ConfigPatch {
//!     max_scale: Some(8.0),
//!     ..ConfigPatch::default()
//! });
//! assert_eq!(config.max_scale, 8.0);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::media::ImageModel;
use crate::ui::geometry::ScaleBounds;
use crate::ui::navigation::NavigationEvent;
use crate::ui::overlay::actions::ActionButton;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LensOverlay";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LENS_OVERLAY_CONFIG_DIR";

// =============================================================================
// Settings file
// =============================================================================

/// Zoom settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoomSettings {
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

/// Overlay chrome and diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlaySettings {
    #[serde(default)]
    pub read_only: bool,
    #[serde(default = "default_close_label")]
    pub close_label: String,
    /// Emit lifecycle and gesture diagnostics through `log`.
    #[serde(default)]
    pub debug: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            read_only: false,
            close_label: default_close_label(),
            debug: false,
        }
    }
}

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub zoom: ZoomSettings,
    #[serde(default)]
    pub overlay: OverlaySettings,
}

fn default_min_scale() -> f32 {
    DEFAULT_MIN_SCALE
}

fn default_max_scale() -> f32 {
    DEFAULT_MAX_SCALE
}

fn default_close_label() -> String {
    DEFAULT_CLOSE_LABEL.to_string()
}

/// Returns the directory holding `settings.toml`.
///
/// `LENS_OVERLAY_CONFIG_DIR` wins over the platform default.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Loads settings from the default location, or defaults when no file exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load() -> Result<Settings> {
    if let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE)) {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Settings::default())
}

/// Loads settings from `path`. Unparsable content yields defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(settings) => Ok(settings),
        Err(err) => {
            log::warn!(
                "ignoring invalid overlay settings in {}: {}",
                path.display(),
                err
            );
            Ok(Settings::default())
        }
    }
}

// =============================================================================
// Runtime configuration
// =============================================================================

/// Called with the closing image when the close button is used.
pub type CloseCallback = Rc<dyn Fn(&ImageModel)>;

/// Called after every gallery navigation, before the `navigate` notification.
pub type ImageSwitchCallback = Rc<dyn Fn(&NavigationEvent)>;

/// Live configuration of an overlay session.
///
/// Scale bounds are expected to satisfy `min_scale <= 1 <= max_scale` so that the
/// reset zoom button lands on the image's displayed size; this is not enforced.
#[derive(Clone)]
pub struct OverlayConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    pub read_only: bool,
    pub close_label: String,
    pub debug: bool,
    pub buttons: Vec<ActionButton>,
    pub on_close: Option<CloseCallback>,
    pub on_image_switch: Option<ImageSwitchCallback>,
}

impl OverlayConfig {
    /// Scale bounds as a clamping helper.
    #[must_use]
    pub fn scale_bounds(&self) -> ScaleBounds {
        ScaleBounds::new(self.min_scale, self.max_scale)
    }

    /// Merges `patch` into this configuration. Every field set in the patch replaces
    /// the current value; unset fields are left untouched.
    pub fn apply(&mut self, patch: ConfigPatch) {
        let ConfigPatch {
            min_scale,
            max_scale,
            read_only,
            close_label,
            debug,
            buttons,
            on_close,
            on_image_switch,
        } = patch;

        if let Some(value) = min_scale {
            self.min_scale = value;
        }
        if let Some(value) = max_scale {
            self.max_scale = value;
        }
        if let Some(value) = read_only {
            self.read_only = value;
        }
        if let Some(value) = close_label {
            self.close_label = value;
        }
        if let Some(value) = debug {
            self.debug = value;
        }
        if let Some(value) = buttons {
            self.buttons = value;
        }
        if let Some(value) = on_close {
            self.on_close = Some(value);
        }
        if let Some(value) = on_image_switch {
            self.on_image_switch = Some(value);
        }
    }

    /// Returns the configuration with an extra action button appended.
    #[must_use]
    pub fn with_button(mut self, button: ActionButton) -> Self {
        self.buttons.push(button);
        self
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::from(Settings::default())
    }
}

impl From<Settings> for OverlayConfig {
    fn from(settings: Settings) -> Self {
        Self {
            min_scale: settings.zoom.min_scale,
            max_scale: settings.zoom.max_scale,
            read_only: settings.overlay.read_only,
            close_label: settings.overlay.close_label,
            debug: settings.overlay.debug,
            buttons: Vec::new(),
            on_close: None,
            on_image_switch: None,
        }
    }
}

impl fmt::Debug for OverlayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayConfig")
            .field("min_scale", &self.min_scale)
            .field("max_scale", &self.max_scale)
            .field("read_only", &self.read_only)
            .field("close_label", &self.close_label)
            .field("debug", &self.debug)
            .field("buttons", &self.buttons)
            .field("on_close", &self.on_close.is_some())
            .field("on_image_switch", &self.on_image_switch.is_some())
            .finish()
    }
}

/// Partial configuration update; `None` keeps the current value.
#[derive(Clone, Default)]
pub struct ConfigPatch {
    pub min_scale: Option<f32>,
    pub max_scale: Option<f32>,
    pub read_only: Option<bool>,
    pub close_label: Option<String>,
    pub debug: Option<bool>,
    pub buttons: Option<Vec<ActionButton>>,
    pub on_close: Option<CloseCallback>,
    pub on_image_switch: Option<ImageSwitchCallback>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    #[test]
    fn default_config_uses_default_scale_bounds() {
        let config = OverlayConfig::default();
        assert_eq!(config.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(config.max_scale, DEFAULT_MAX_SCALE);
        assert!(!config.read_only);
        assert_eq!(config.close_label, DEFAULT_CLOSE_LABEL);
        assert!(config.buttons.is_empty());
    }

    #[test]
    fn load_from_path_reads_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[zoom]\nmax_scale = 8.0\n\n[overlay]\nread_only = true\nclose_label = \"Fermer\"\n",
        )
        .expect("failed to write settings");

        let settings = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(settings.zoom.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(settings.zoom.max_scale, 8.0);
        assert!(settings.overlay.read_only);
        assert_eq!(settings.overlay.close_label, "Fermer");
        assert!(!settings.overlay.debug);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn load_from_path_reports_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn apply_replaces_only_set_fields() {
        let mut config = OverlayConfig::default();
        config.apply(ConfigPatch {
            max_scale: Some(3.0),
            read_only: Some(true),
            ..ConfigPatch::default()
        });

        assert_eq!(config.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(config.max_scale, 3.0);
        assert!(config.read_only);
        assert_eq!(config.close_label, DEFAULT_CLOSE_LABEL);
    }

    #[test]
    fn apply_installs_callbacks() {
        let closed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&closed);
        let mut config = OverlayConfig::default();
        config.apply(ConfigPatch {
            on_close: Some(Rc::new(move |_image: &ImageModel| {
                counter.set(counter.get() + 1);
            })),
            ..ConfigPatch::default()
        });

        let callback = config.on_close.expect("callback should be installed");
        callback(&ImageModel::new("a.png", "A"));
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn settings_convert_into_overlay_config() {
        let settings = Settings {
            zoom: ZoomSettings {
                min_scale: 0.5,
                max_scale: 4.0,
            },
            overlay: OverlaySettings {
                read_only: true,
                close_label: "Done".to_string(),
                debug: true,
            },
        };
        let config = OverlayConfig::from(settings);
        assert_eq!(config.scale_bounds(), ScaleBounds::new(0.5, 4.0));
        assert!(config.read_only);
        assert!(config.debug);
        assert_eq!(config.close_label, "Done");
    }
}
