//! CPU-side generation of the three unit meshes.
//!
//! Each instance class draws one small indexed mesh: a slab for bases, a
//! UV sphere for backbone nodes, and an open cylinder for hydrogen bonds.
//! All meshes are centered on the origin with their long axis conventions
//! matching the layout's transforms (slab depth along +Z, cylinder along Y).

use std::f32::consts::{PI, TAU};

/// One mesh vertex: position plus outward normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit outward normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout for the shared mesh shader.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Axis-aligned box with per-face normals (4 vertices per face).
    #[must_use]
    pub fn slab(width: f32, height: f32, depth: f32) -> Self {
        let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);

        // (normal, four corners counter-clockwise seen from outside)
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            (
                [0.0, 0.0, 1.0],
                [
                    [-hw, -hh, hd],
                    [hw, -hh, hd],
                    [hw, hh, hd],
                    [-hw, hh, hd],
                ],
            ),
            (
                [0.0, 0.0, -1.0],
                [
                    [hw, -hh, -hd],
                    [-hw, -hh, -hd],
                    [-hw, hh, -hd],
                    [hw, hh, -hd],
                ],
            ),
            (
                [1.0, 0.0, 0.0],
                [
                    [hw, -hh, hd],
                    [hw, -hh, -hd],
                    [hw, hh, -hd],
                    [hw, hh, hd],
                ],
            ),
            (
                [-1.0, 0.0, 0.0],
                [
                    [-hw, -hh, -hd],
                    [-hw, -hh, hd],
                    [-hw, hh, hd],
                    [-hw, hh, -hd],
                ],
            ),
            (
                [0.0, 1.0, 0.0],
                [
                    [-hw, hh, hd],
                    [hw, hh, hd],
                    [hw, hh, -hd],
                    [-hw, hh, -hd],
                ],
            ),
            (
                [0.0, -1.0, 0.0],
                [
                    [-hw, -hh, -hd],
                    [hw, -hh, -hd],
                    [hw, -hh, hd],
                    [-hw, -hh, hd],
                ],
            ),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in faces {
            let base = vertices.len() as u32;
            for position in corners {
                vertices.push(MeshVertex { position, normal });
            }
            indices.extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base,
                base + 2,
                base + 3,
            ]);
        }

        Self { vertices, indices }
    }

    /// UV sphere with `sectors` longitude and `stacks` latitude divisions.
    #[must_use]
    pub fn uv_sphere(radius: f32, sectors: u32, stacks: u32) -> Self {
        let mut vertices = Vec::with_capacity(
            ((stacks + 1) * (sectors + 1)) as usize,
        );
        for stack in 0..=stacks {
            // phi: 0 at the north pole, pi at the south
            let phi = PI * stack as f32 / stacks as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for sector in 0..=sectors {
                let theta = TAU * sector as f32 / sectors as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();
                let normal =
                    [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
                vertices.push(MeshVertex {
                    position: [
                        normal[0] * radius,
                        normal[1] * radius,
                        normal[2] * radius,
                    ],
                    normal,
                });
            }
        }

        let ring = sectors + 1;
        let mut indices =
            Vec::with_capacity((stacks * sectors * 6) as usize);
        for stack in 0..stacks {
            for sector in 0..sectors {
                let a = stack * ring + sector;
                let b = a + ring;
                // Two triangles per quad; the degenerate pole triangles are
                // harmless and keep the indexing uniform.
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        Self { vertices, indices }
    }

    /// Open cylinder along Y, centered on the origin.
    #[must_use]
    pub fn cylinder(radius: f32, height: f32, sides: u32) -> Self {
        let hh = height / 2.0;
        let mut vertices =
            Vec::with_capacity(2 * (sides as usize + 1));
        for y in [-hh, hh] {
            for side in 0..=sides {
                let theta = TAU * side as f32 / sides as f32;
                let (sin, cos) = theta.sin_cos();
                vertices.push(MeshVertex {
                    position: [cos * radius, y, sin * radius],
                    normal: [cos, 0.0, sin],
                });
            }
        }

        let ring = sides + 1;
        let mut indices = Vec::with_capacity(6 * sides as usize);
        for side in 0..sides {
            let a = side;
            let b = side + ring;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }

        Self { vertices, indices }
    }

    /// Number of indices (what the draw call consumes).
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(mesh: &Mesh) {
        for v in &mesh.vertices {
            let len_sq: f32 = v.normal.iter().map(|c| c * c).sum();
            assert!((len_sq - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn slab_has_six_faces() {
        let mesh = Mesh::slab(1.2, 0.2, 0.6);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_unit_normals(&mesh);
        // Extents match the requested dimensions.
        let max_x = mesh
            .vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, 0.6);
    }

    #[test]
    fn sphere_vertices_sit_on_the_radius() {
        let mesh = Mesh::uv_sphere(0.3, 16, 16);
        assert_eq!(mesh.vertices.len(), 17 * 17);
        assert_unit_normals(&mesh);
        for v in &mesh.vertices {
            let r: f32 =
                v.position.iter().map(|c| c * c).sum::<f32>().sqrt();
            assert!((r - 0.3).abs() < 1e-5);
        }
    }

    #[test]
    fn cylinder_spans_centered_height() {
        let mesh = Mesh::cylinder(0.02, 1.0, 8);
        assert_eq!(mesh.vertices.len(), 18);
        assert_eq!(mesh.index_count(), 48);
        assert_unit_normals(&mesh);
        for v in &mesh.vertices {
            assert!(v.position[1] == -0.5 || v.position[1] == 0.5);
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        for mesh in [
            Mesh::slab(1.0, 1.0, 1.0),
            Mesh::uv_sphere(1.0, 8, 8),
            Mesh::cylinder(1.0, 1.0, 6),
        ] {
            let n = mesh.vertices.len() as u32;
            assert!(mesh.indices.iter().all(|i| *i < n));
        }
    }
}
