//! Shared instanced-mesh draw pass.
//!
//! Every helix geometry class (bases, backbone nodes, bonds) follows the
//! same pattern: one static unit mesh, one storage buffer of per-instance
//! transforms + colors, one bind group, one pipeline, and a single
//! `draw_indexed(.., 0..instance_count)` call. `InstancePass` extracts that
//! boilerplate so each class is just a mesh plus a label.

use wgpu::util::DeviceExt;

use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::layout::InstanceRaw;
use crate::renderer::mesh::{Mesh, MeshVertex};

/// Bind group layouts shared by the instanced pipelines:
/// - group(0): storage buffer (instances), owned per pass
/// - group(1): camera uniform
/// - group(2): lighting uniform
/// - group(3): helix group spin transform
pub struct PipelineLayouts<'a> {
    /// Camera uniform layout.
    pub camera: &'a wgpu::BindGroupLayout,
    /// Lighting uniform layout.
    pub lighting: &'a wgpu::BindGroupLayout,
    /// Spin transform uniform layout.
    pub rotator: &'a wgpu::BindGroupLayout,
}

/// Bind groups passed to every instanced draw.
pub struct DrawBindGroups<'a> {
    /// Camera uniform bind group.
    pub camera: &'a wgpu::BindGroup,
    /// Lighting uniform bind group.
    pub lighting: &'a wgpu::BindGroup,
    /// Spin transform bind group.
    pub rotator: &'a wgpu::BindGroup,
}

/// A single instanced mesh pass: pipeline + mesh buffers + instance storage.
pub struct InstancePass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: TypedBuffer<InstanceRaw>,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    /// Number of instances drawn by [`Self::draw`].
    pub instance_count: u32,
}

impl InstancePass {
    /// Create a pass drawing `mesh`, with instance capacity reserved up
    /// front so in-range sequence growth never reallocates.
    pub fn new(
        context: &RenderContext,
        label: &str,
        mesh: &Mesh,
        instance_capacity: usize,
        layouts: &PipelineLayouts,
    ) -> Self {
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let instance_buffer = TypedBuffer::with_capacity(
            &context.device,
            &format!("{label} Instance Buffer"),
            instance_capacity,
            wgpu::BufferUsages::STORAGE,
        );

        let bind_group_layout =
            Self::create_bind_group_layout(&context.device, label);
        let bind_group = Self::create_bind_group(
            &context.device,
            &bind_group_layout,
            &instance_buffer,
            label,
        );
        let pipeline =
            Self::create_pipeline(context, label, &bind_group_layout, layouts);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            instance_buffer,
            bind_group_layout,
            bind_group,
            instance_count: 0,
        }
    }

    fn create_bind_group_layout(
        device: &wgpu::Device,
        label: &str,
    ) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &TypedBuffer<InstanceRaw>,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.buffer().as_entire_binding(),
            }],
            label: Some(&format!("{label} Bind Group")),
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        label: &str,
        bind_group_layout: &wgpu::BindGroupLayout,
        layouts: &PipelineLayouts,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/helix_mesh.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} Pipeline Layout")),
                bind_group_layouts: &[
                    bind_group_layout,
                    layouts.camera,
                    layouts.lighting,
                    layouts.rotator,
                ],
                push_constant_ranges: &[],
            },
        );

        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&format!("{label} Pipeline")),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[MeshVertex::layout()],
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
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(super::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    /// Upload instances to the GPU buffer. Recreates the bind group if the
    /// buffer was reallocated.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[InstanceRaw],
    ) {
        let reallocated = self.instance_buffer.write(device, queue, instances);
        if reallocated {
            self.bind_group = Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.instance_buffer,
                "reallocated",
            );
        }
        self.instance_count = instances.len() as u32;
    }

    /// Issue the instanced draw for this pass.
    ///
    /// Sets the pipeline and bind groups 0-3, then draws the mesh once per
    /// instance. No-op when the instance count is zero.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        bind_groups: &DrawBindGroups<'a>,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_bind_group(1, bind_groups.camera, &[]);
        render_pass.set_bind_group(2, bind_groups.lighting, &[]);
        render_pass.set_bind_group(3, bind_groups.rotator, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}
