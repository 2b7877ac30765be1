//! The rendering engine and application root.
//!
//! [`HelixEngine`] owns the GPU context, the renderers, and the model
//! (sequence + view state), and exposes the command surface the window
//! shell drives: mouse orbit, bindable key actions, per-frame update and
//! render.

mod actions;
mod core;

pub use self::core::HelixEngine;
