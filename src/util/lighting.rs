use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::LightingOptions;

/// Lighting configuration shared across the mesh shader.
/// NOTE: Must match the WGSL struct layout exactly (64 bytes)
///
/// WGSL layout (explicitly padded):
///   light1_dir: vec3<f32>       (offset 0,  align 16)
///   _pad1: f32                  (offset 12)
///   light2_dir: vec3<f32>       (offset 16, align 16)
///   _pad2: f32                  (offset 28)
///   light1_intensity: f32       (offset 32)
///   light2_intensity: f32       (offset 36)
///   ambient: f32                (offset 40)
///   specular_intensity: f32     (offset 44)
///   shininess: f32              (offset 48)
///   _pad3: vec3<f32>            (offset 52)
///   Total: 64 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Key light direction (normalized, pointing toward the light).
    pub light1_dir: [f32; 3],
    /// Alignment padding.
    pub _pad1: f32,
    /// Fill light direction (normalized).
    pub light2_dir: [f32; 3],
    /// Alignment padding.
    pub _pad2: f32,
    /// Key light intensity.
    pub light1_intensity: f32,
    /// Fill light intensity.
    pub light2_intensity: f32,
    /// Ambient light intensity.
    pub ambient: f32,
    /// Specular intensity.
    pub specular_intensity: f32,
    /// Specular shininess exponent.
    pub shininess: f32,
    /// Alignment padding.
    pub _pad3: [f32; 3],
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            // Key light: upper-right-front, matching the lab's main lamp
            light1_dir: normalize([0.5, 0.5, 0.5]),
            _pad1: 0.0,
            // Fill light: lower-left for soft contrast on the far strand
            light2_dir: normalize([-0.6, -0.6, -0.3]),
            _pad2: 0.0,
            light1_intensity: 1.0,
            light2_intensity: 0.5,
            ambient: 0.5,
            specular_intensity: 0.35,
            shininess: 38.0,
            _pad3: [0.0; 3],
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Lighting uniform plus its GPU resources.
pub struct Lighting {
    /// CPU copy of the uniform.
    pub uniform: LightingUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout shared by the mesh pipelines.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`Self::buffer`].
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create lighting resources with intensities from `options`.
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let mut uniform = LightingUniform::default();
        apply(&mut uniform, options);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
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
                    label: Some("Lighting Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Re-apply option intensities and upload the uniform.
    pub fn update(&mut self, queue: &wgpu::Queue, options: &LightingOptions) {
        apply(&mut self.uniform, options);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}

fn apply(uniform: &mut LightingUniform, options: &LightingOptions) {
    uniform.light1_intensity = options.light1_intensity;
    uniform.light2_intensity = options.light2_intensity;
    uniform.ambient = options.ambient;
    uniform.specular_intensity = options.specular_intensity;
    uniform.shininess = options.shininess;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_sixty_four_bytes() {
        assert_eq!(std::mem::size_of::<LightingUniform>(), 64);
    }

    #[test]
    fn directions_are_normalized() {
        let uniform = LightingUniform::default();
        for dir in [uniform.light1_dir, uniform.light2_dir] {
            let len_sq: f32 = dir.iter().map(|c| c * c).sum();
            assert!((len_sq - 1.0).abs() < 1e-6);
        }
    }
}
