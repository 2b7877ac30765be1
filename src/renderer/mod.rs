//! Rendering subsystems for the helix scene.
//!
//! Three instanced mesh passes (bases, backbone, bonds) share one shader
//! and pipeline shape; the floor grid and the spin transform round out the
//! scene. Post-processing is deliberately absent: the demo draws straight
//! to the swapchain in one pass.

/// Lab-floor line grid.
pub mod grid;
/// Shared instanced-mesh draw pass.
pub mod instance_pass;
/// Unit mesh generation (slab, sphere, cylinder).
pub mod mesh;
/// Continuous spin transform for the helix group.
pub mod rotator;

pub use grid::GridRenderer;
pub use instance_pass::{DrawBindGroups, InstancePass, PipelineLayouts};
pub use mesh::{Mesh, MeshVertex};
pub use rotator::Rotator;

use crate::gpu::render_context::RenderContext;

/// Standard depth-stencil state used by all render pipelines.
#[must_use]
pub fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Create the depth texture view matching the current surface size.
#[must_use]
pub fn create_depth_view(context: &RenderContext) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: context.config.width,
        height: context.config.height,
        depth_or_array_layers: 1,
    };

    let desc = wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    };

    context
        .device
        .create_texture(&desc)
        .create_view(&wgpu::TextureViewDescriptor::default())
}
