//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (camera, lighting, colors, keybindings, initial
//! view state) are consolidated here. Options serialize to/from TOML so a
//! preset file can override any subset of fields.

mod camera;
mod colors;
mod helix;
mod keybindings;
mod lighting;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::{srgb8, ColorOptions};
pub use helix::HelixOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
use serde::{Deserialize, Serialize};

use crate::error::HelixError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Color palette options.
    pub colors: ColorOptions,
    /// Initial helix view state.
    pub helix: HelixOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `OptionsParse` on invalid TOML.
    pub fn load(path: &Path) -> Result<Self, HelixError> {
        let content = std::fs::read_to_string(path).map_err(HelixError::Io)?;
        let mut opts: Self = toml::from_str(&content)
            .map_err(|e| HelixError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// `OptionsParse` on serialization failure, `Io` on write failure.
    pub fn save(&self, path: &Path) -> Result<(), HelixError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HelixError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HelixError::Io)?;
        }
        std::fs::write(path, content).map_err(HelixError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let mut parsed: Options = toml::from_str(&toml_str).unwrap();
        parsed.keybindings.rebuild_reverse_map();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[lighting]
shininess = 80.0

[helix]
length = 30
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.lighting.shininess, 80.0);
        assert_eq!(opts.helix.length, 30);
        // Everything else should be default
        assert_eq!(opts.lighting.ambient, 0.5);
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.helix.twist, 34.0);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyQ"),
            Some(KeyAction::RecenterCamera)
        );
        assert_eq!(opts.keybindings.lookup("KeyM"), Some(KeyAction::Mutate));
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(KeyAction::ToggleSpin)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn preset_view_state_is_clamped() {
        let toml_str = r"
[helix]
length = 500
twist = 10.0
spin_speed = 99.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        let state = opts.helix.initial_view_state();
        assert_eq!(state.length, 60);
        assert_eq!(state.twist, 30.0);
        assert_eq!(state.spin_speed, 5.0);
        assert!(state.validate().is_ok());
    }
}
