//! GPU resource plumbing: device/surface context and growable buffers.

/// Dynamic GPU buffer management with automatic resizing.
pub mod dynamic_buffer;
/// wgpu device, queue, surface, and configuration ownership.
pub mod render_context;
