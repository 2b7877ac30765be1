//! Camera system for 3D scene viewing.
//!
//! A perspective camera plus a quaternion orbital controller with rotation,
//! panning, zoom, and a home position framing the whole helix.

/// Orbital camera controller managing rotation, pan, zoom, and GPU resources.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use self::core::{Camera, CameraUniform};
pub use controller::CameraController;
