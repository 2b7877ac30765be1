//! Lab-floor grid: the scene's only dressing beyond the clear color.
//!
//! A 100-unit line grid with 50 divisions at y = -20, center lines slightly
//! brighter, drawn with a camera-only line-list pipeline.

use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::srgb8;

/// Grid side length in world units.
const GRID_SIZE: f32 = 100.0;
/// Number of divisions per side.
const GRID_DIVISIONS: u32 = 50;
/// Height of the lab floor below the helix.
const GRID_HEIGHT: f32 = -20.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GridVertex {
    position: [f32; 3],
    color: [f32; 3],
}

impl GridVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
}

/// The floor grid renderer.
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GridRenderer {
    /// Build the grid geometry and pipeline.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let vertices = Self::generate_vertices();

        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Grid Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/grid.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Grid Pipeline Layout"),
                bind_group_layouts: &[camera_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Grid Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<GridVertex>()
                            as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &GridVertex::ATTRIBS,
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineList,
                    ..Default::default()
                },
                depth_stencil: Some(super::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    fn generate_vertices() -> Vec<GridVertex> {
        let center_color = srgb8(0x44, 0x44, 0x44);
        let line_color = srgb8(0x22, 0x22, 0x22);
        let half = GRID_SIZE / 2.0;
        let step = GRID_SIZE / GRID_DIVISIONS as f32;

        let mut vertices =
            Vec::with_capacity(4 * (GRID_DIVISIONS as usize + 1));
        for i in 0..=GRID_DIVISIONS {
            let offset = -half + i as f32 * step;
            let color = if i == GRID_DIVISIONS / 2 {
                center_color
            } else {
                line_color
            };
            // Line parallel to X
            vertices.push(GridVertex {
                position: [-half, GRID_HEIGHT, offset],
                color,
            });
            vertices.push(GridVertex {
                position: [half, GRID_HEIGHT, offset],
                color,
            });
            // Line parallel to Z
            vertices.push(GridVertex {
                position: [offset, GRID_HEIGHT, -half],
                color,
            });
            vertices.push(GridVertex {
                position: [offset, GRID_HEIGHT, half],
                color,
            });
        }
        vertices
    }

    /// Draw the grid.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_line_counts() {
        let vertices = GridRenderer::generate_vertices();
        // 51 lines per axis, 2 vertices per line, 2 axes.
        assert_eq!(vertices.len(), 4 * 51);
        assert!(vertices.iter().all(|v| v.position[1] == GRID_HEIGHT));
    }
}
