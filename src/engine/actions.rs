//! Bindable key actions applied to the engine.

use crate::engine::HelixEngine;
use crate::input::KeyAction;

/// One arrow-key step in base pairs.
const LENGTH_STEP: usize = 1;
/// One arrow-key step in degrees of twist.
const TWIST_STEP: f32 = 0.2;
/// One key step in spin speed (radians per second).
const SPIN_SPEED_STEP: f32 = 0.25;

impl HelixEngine {
    /// Apply a bound key action. All parameter changes go through the
    /// clamping setters, so repeated presses saturate at the range edges.
    pub fn apply_action(&mut self, action: KeyAction) {
        let state = *self.view_state();
        match action {
            KeyAction::RecenterCamera => self.recenter_camera(),
            KeyAction::Mutate => self.mutate(),
            KeyAction::NewSequence => self.new_sequence(),
            KeyAction::ToggleSpin => self.toggle_spin(),
            KeyAction::IncreaseLength => {
                self.set_length(state.length + LENGTH_STEP);
            }
            KeyAction::DecreaseLength => {
                self.set_length(state.length.saturating_sub(LENGTH_STEP));
            }
            KeyAction::IncreaseTwist => {
                self.set_twist(state.twist + TWIST_STEP);
            }
            KeyAction::DecreaseTwist => {
                self.set_twist(state.twist - TWIST_STEP);
            }
            KeyAction::IncreaseSpinSpeed => {
                self.set_spin_speed(state.spin_speed + SPIN_SPEED_STEP);
            }
            KeyAction::DecreaseSpinSpeed => {
                self.set_spin_speed(state.spin_speed - SPIN_SPEED_STEP);
            }
        }
    }
}
