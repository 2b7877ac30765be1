use serde::{Deserialize, Serialize};

use crate::model::ViewState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Initial helix view state, applied once at startup.
pub struct HelixOptions {
    /// Starting sequence length in base pairs.
    pub length: usize,
    /// Starting twist in degrees per base pair.
    pub twist: f32,
    /// Whether the helix spins on launch.
    pub auto_spin: bool,
    /// Starting spin speed in radians per second.
    pub spin_speed: f32,
}

impl Default for HelixOptions {
    fn default() -> Self {
        let state = ViewState::default();
        Self {
            length: state.length,
            twist: state.twist,
            auto_spin: state.auto_spin,
            spin_speed: state.spin_speed,
        }
    }
}

impl HelixOptions {
    /// Build the initial [`ViewState`], clamping every field to its declared
    /// range so hand-edited presets cannot produce an invalid model.
    #[must_use]
    pub fn initial_view_state(&self) -> ViewState {
        let mut state = ViewState {
            auto_spin: self.auto_spin,
            ..ViewState::default()
        };
        state.set_length(self.length);
        state.set_twist(self.twist);
        state.set_spin_speed(self.spin_speed);
        state
    }
}
