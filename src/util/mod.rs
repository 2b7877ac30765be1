//! Small shared utilities: frame timing and lighting resources.

/// Frame timing with FPS calculation.
pub mod frame_timing;
/// Lighting uniform and GPU resources.
pub mod lighting;

pub use frame_timing::FrameTiming;
pub use lighting::{Lighting, LightingUniform};
