//! Input handling: the bindable action vocabulary.
//!
//! Key codes map to [`KeyAction`] values through
//! [`crate::options::KeybindingOptions`]; mouse input goes straight to the
//! engine's camera plumbing.

mod keyboard;

pub use keyboard::KeyAction;
