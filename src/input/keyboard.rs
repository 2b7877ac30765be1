use serde::{Deserialize, Serialize};

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings]
/// mutate = "KeyM"
/// toggle_spin = "Space"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Reset the orbital camera to its home position.
    RecenterCamera,
    /// Randomize ~10% of the sequence with a highlight flash.
    Mutate,
    /// Regenerate the whole sequence at the current length.
    NewSequence,
    /// Toggle continuous spin.
    ToggleSpin,
    /// Grow the sequence by one base pair.
    IncreaseLength,
    /// Shrink the sequence by one base pair.
    DecreaseLength,
    /// Raise the twist angle.
    IncreaseTwist,
    /// Lower the twist angle.
    DecreaseTwist,
    /// Spin faster.
    IncreaseSpinSpeed,
    /// Spin slower.
    DecreaseSpinSpeed,
}
