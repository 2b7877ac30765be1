//! Helix layout: sequence + twist → per-instance transforms and colors.
//!
//! [`compute`] is the geometric heart of the crate. It is a pure function:
//! identical inputs produce bit-identical instance buffers, it never fails,
//! and it touches no state beyond the explicit `now` used for the mutation
//! highlight window. Callers re-invoke it in full on any relevant change and
//! discard the previous buffers; nothing is diffed incrementally.
//!
//! The parametrization is the standard double helix: pair `i` sits at height
//! `(i - count/2) * RISE` (centering the assembly on the origin) and angle
//! `i * twist`, with the two strands diametrically opposite on a circle of
//! radius [`RADIUS`]. Bases project inward at half that radius, facing the
//! central axis; hydrogen bonds bridge the remaining gap along the tangent.

use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Instant;

use glam::{Mat4, Quat, Vec3};

use crate::model::Sequence;
use crate::options::ColorOptions;

/// Vertical distance between successive base pairs.
pub const RISE: f32 = 0.6;
/// Backbone strand radius.
pub const RADIUS: f32 = 2.0;
/// Base slab dimensions: width (tangential), height, depth (radial).
pub const BASE_SIZE: [f32; 3] = [1.2, 0.2, 0.6];
/// Backbone sphere radius.
pub const BACKBONE_RADIUS: f32 = 0.3;
/// Hydrogen bond cylinder radius.
pub const BOND_RADIUS: f32 = 0.02;
/// Tangential spacing between hydrogen bonds of one pair.
pub const BOND_SPACING: f32 = 0.2;
/// Bond length as a scale of the unit-height cylinder, sized to bridge the
/// gap between the two inward-facing bases.
pub const BOND_LENGTH: f32 = 0.5;

/// One placed instance: transform decomposed for inspectability, plus color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    /// World-space position.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl Instance {
    /// GPU-ready form: composed model matrix plus color.
    #[must_use]
    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            model: Mat4::from_scale_rotation_translation(
                self.scale,
                self.rotation,
                self.position,
            )
            .to_cols_array_2d(),
            color: self.color,
        }
    }
}

/// Per-instance data as uploaded to the GPU storage buffer.
/// Must match the WGSL `Instance` struct layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Linear RGBA.
    pub color: [f32; 4],
}

/// The three instance classes produced by one layout pass.
///
/// Bases and backbone are always exactly `2 * count` instances. Bonds hold
/// only the valid instances (2 or 3 per pair) with capacity reserved at the
/// `3 * count` worst case; consumers draw `bonds.len()` instances rather
/// than hiding unused slots off-screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceBuffers {
    /// Base slabs, two per pair (left strand first).
    pub bases: Vec<Instance>,
    /// Backbone nodes, two per pair (left strand first).
    pub backbone: Vec<Instance>,
    /// Hydrogen bonds, 2 or 3 per pair.
    pub bonds: Vec<Instance>,
}

/// Lay out the full helix.
///
/// Total over valid inputs and safe to call at refresh rate; callers that
/// want to skip redundant recomputation do so with their own dirty check —
/// skipping is an optimization, never a correctness requirement.
#[must_use]
pub fn compute(
    sequence: &Sequence,
    twist_degrees: f32,
    colors: &ColorOptions,
    now: Instant,
) -> InstanceBuffers {
    let count = sequence.len();
    let twist = twist_degrees.to_radians();

    let mut out = InstanceBuffers {
        bases: Vec::with_capacity(count * 2),
        backbone: Vec::with_capacity(count * 2),
        bonds: Vec::with_capacity(count * 3),
    };

    let backbone_color = rgba(colors.backbone, 1.0);
    let bond_color = rgba(colors.bond, colors.bond_alpha);

    for (i, pair) in sequence.pairs().iter().enumerate() {
        let y = (i as f32 - count as f32 / 2.0) * RISE;
        let theta = i as f32 * twist;
        let flashing = pair.is_flashing(now);

        for (angle, base) in [(theta, pair.left), (theta + PI, pair.right)] {
            let (sin, cos) = angle.sin_cos();

            // Backbone node on the strand circle. The sphere is rotationally
            // symmetric, so no orientation is applied.
            out.backbone.push(Instance {
                position: Vec3::new(cos * RADIUS, y, sin * RADIUS),
                rotation: Quat::IDENTITY,
                scale: Vec3::ONE,
                color: backbone_color,
            });

            // Base slab at half radius, slab depth pointing at the axis.
            let base_color = if flashing {
                rgba(colors.highlight, 1.0)
            } else {
                rgba(colors.base_color(base), 1.0)
            };
            out.bases.push(Instance {
                position: Vec3::new(cos * RADIUS * 0.5, y, sin * RADIUS * 0.5),
                rotation: face_axis(angle),
                scale: Vec3::ONE,
                color: base_color,
            });
        }

        // Hydrogen bonds at the pair's center height, spread along the
        // tangent. 2 bonds straddle the axis, 3 add one on it.
        let (sin, cos) = theta.sin_cos();
        let tangent = Vec3::new(-sin, 0.0, cos);
        let radial = Vec3::new(cos, 0.0, sin);
        let offsets: &[f32] = if pair.bond_count() == 3 {
            &[-1.0, 0.0, 1.0]
        } else {
            &[-0.5, 0.5]
        };
        for &offset in offsets {
            out.bonds.push(Instance {
                position: Vec3::new(0.0, y, 0.0)
                    + tangent * (offset * BOND_SPACING),
                rotation: Quat::from_rotation_arc(Vec3::Y, radial),
                scale: Vec3::new(1.0, BOND_LENGTH, 1.0),
                color: bond_color,
            });
        }
    }

    out
}

/// Yaw that points an instance's local +Z axis at the helix axis from the
/// given strand angle.
fn face_axis(angle: f32) -> Quat {
    Quat::from_rotation_y(-(angle + FRAC_PI_2))
}

fn rgba(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::BasePair;

    fn sequence(n: usize) -> Sequence {
        let mut rng = StdRng::seed_from_u64(1);
        Sequence::generate(n, &mut rng).unwrap()
    }

    fn layout(seq: &Sequence, twist: f32) -> InstanceBuffers {
        compute(seq, twist, &ColorOptions::default(), Instant::now())
    }

    #[test]
    fn reference_heights_and_strand_opposition() {
        let seq = sequence(20);
        let buffers = layout(&seq, 34.0);

        // Pair 0, left strand: height (0 - 20/2) * 0.6 = -6.0, angle 0.
        let left = buffers.backbone[0];
        assert_eq!(left.position.y, -6.0);
        assert_eq!(left.position.x, RADIUS);

        // Right strand is diametrically opposite: angle difference is pi.
        let right = buffers.backbone[1];
        assert_eq!(right.position.y, -6.0);
        let left_angle = left.position.z.atan2(left.position.x);
        let right_angle = right.position.z.atan2(right.position.x);
        let diff = (right_angle - left_angle).rem_euclid(2.0 * PI);
        assert!((diff - PI).abs() < 1e-5);
    }

    #[test]
    fn assembly_is_centered_on_the_origin() {
        let seq = sequence(20);
        let buffers = layout(&seq, 34.0);
        let mean_y: f32 = buffers
            .backbone
            .iter()
            .map(|inst| inst.position.y)
            .sum::<f32>()
            / buffers.backbone.len() as f32;
        // Mean height is -RISE/2 of exact center because index 0 sits at
        // -count/2 and index count-1 at count/2 - 1.
        assert!((mean_y + RISE / 2.0).abs() < 1e-4);
    }

    #[test]
    fn buffer_sizes_follow_the_instance_classes() {
        let seq = sequence(20);
        let buffers = layout(&seq, 34.0);
        assert_eq!(buffers.bases.len(), 40);
        assert_eq!(buffers.backbone.len(), 40);
        let expected_bonds: usize =
            seq.pairs().iter().map(BasePair::bond_count).sum();
        assert_eq!(buffers.bonds.len(), expected_bonds);
        assert!(buffers.bonds.len() >= 40);
        assert!(buffers.bonds.len() <= 60);
    }

    #[test]
    fn bond_rule_three_for_gc_two_for_at() {
        let seq = sequence(20);
        let count = seq.len();
        let buffers = layout(&seq, 34.0);

        // Bonds sit at their pair's center height, which is unique per
        // index, so counting by height isolates each pair's contribution.
        for (i, pair) in seq.pairs().iter().enumerate() {
            let y = (i as f32 - count as f32 / 2.0) * RISE;
            let at_height = buffers
                .bonds
                .iter()
                .filter(|b| b.position.y == y)
                .count();
            let expected = if pair.left.triple_bonded() { 3 } else { 2 };
            assert_eq!(at_height, expected, "pair {i} ({:?})", pair.left);
        }

        // A 20-pair random draw exercises both bond multiplicities.
        assert!(seq.pairs().iter().any(|p| p.left.triple_bonded()));
        assert!(seq.pairs().iter().any(|p| !p.left.triple_bonded()));
    }

    #[test]
    fn bases_face_the_central_axis() {
        let seq = sequence(12);
        let buffers = layout(&seq, 36.0);
        for inst in &buffers.bases {
            let forward = inst.rotation * Vec3::Z;
            let to_axis = Vec3::new(-inst.position.x, 0.0, -inst.position.z)
                .normalize();
            assert!(forward.dot(to_axis) > 0.999_9);
        }
    }

    #[test]
    fn bonds_are_radial_and_short() {
        let seq = sequence(10);
        let buffers = layout(&seq, 30.0);
        for inst in &buffers.bonds {
            let length_axis = inst.rotation * Vec3::Y;
            assert!(length_axis.y.abs() < 1e-5, "bond lies horizontal");
            assert_eq!(inst.scale.y, BOND_LENGTH);
            // Bond centers hug the axis: offset by at most one spacing.
            let horizontal = Vec3::new(inst.position.x, 0.0, inst.position.z);
            assert!(horizontal.length() <= BOND_SPACING + 1e-5);
        }
    }

    #[test]
    fn idempotent_for_identical_inputs() {
        let seq = sequence(20);
        let colors = ColorOptions::default();
        let now = Instant::now();
        let a = compute(&seq, 34.0, &colors, now);
        let b = compute(&seq, 34.0, &colors, now);
        assert_eq!(a, b);
        assert_eq!(
            a.bases.iter().map(Instance::to_raw).collect::<Vec<_>>(),
            b.bases.iter().map(Instance::to_raw).collect::<Vec<_>>()
        );
    }

    #[test]
    fn flash_overrides_both_strand_colors_within_the_window() {
        let mut rng = StdRng::seed_from_u64(4);
        let seq = Sequence::generate(10, &mut rng).unwrap();
        let colors = ColorOptions::default();
        let now = Instant::now();
        let mutated = seq.mutate(&mut rng, now);

        let buffers = compute(&mutated, 34.0, &colors, now);
        let highlight = [
            colors.highlight[0],
            colors.highlight[1],
            colors.highlight[2],
            1.0,
        ];
        for (i, pair) in mutated.pairs().iter().enumerate() {
            if pair.mutated_at == Some(now) {
                assert_eq!(buffers.bases[i * 2].color, highlight);
                assert_eq!(buffers.bases[i * 2 + 1].color, highlight);
            }
        }

        // After the window closes, palette colors return.
        let later = now + crate::model::FLASH_WINDOW;
        let settled = compute(&mutated, 34.0, &colors, later);
        for (i, pair) in mutated.pairs().iter().enumerate() {
            let expected = rgba(colors.base_color(pair.left), 1.0);
            assert_eq!(settled.bases[i * 2].color, expected);
        }
    }

    #[test]
    fn twist_range_sweep_stays_total() {
        let seq = sequence(60);
        for twist in [30.0_f32, 33.3, 36.0] {
            let buffers = layout(&seq, twist);
            assert_eq!(buffers.backbone.len(), 120);
            assert_eq!(buffers.bases.len(), 120);
        }
    }
}
