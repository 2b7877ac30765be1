//! Continuous spin transform for the helix group.
//!
//! A view-layer effect: the angle advances by `spin_speed * dt` each frame
//! while auto-spin is on and is applied to every helix instance in the
//! vertex shader. Model state is never touched.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct RotatorUniform {
    model: [[f32; 4]; 4],
}

/// Spin angle plus its GPU uniform resources.
pub struct Rotator {
    angle: f32,
    buffer: wgpu::Buffer,
    /// Bind group layout for the spin uniform.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over the spin uniform buffer.
    pub bind_group: wgpu::BindGroup,
}

impl Rotator {
    /// Create the spin resources at angle zero.
    pub fn new(context: &RenderContext) -> Self {
        let uniform = RotatorUniform {
            model: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Rotator Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Rotator Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Rotator Bind Group"),
                });

        Self {
            angle: 0.0,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Advance the spin angle by `speed * dt` radians and upload the
    /// rotation matrix. Keeps the angle wrapped to avoid float drift over
    /// long sessions.
    pub fn advance(&mut self, queue: &wgpu::Queue, speed: f32, dt: f32) {
        self.angle = (self.angle + speed * dt) % std::f32::consts::TAU;
        self.upload(queue);
    }

    /// Current spin angle in radians.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    fn upload(&self, queue: &wgpu::Queue) {
        let uniform = RotatorUniform {
            model: Mat4::from_rotation_y(self.angle).to_cols_array_2d(),
        };
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}
