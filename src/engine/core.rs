use std::time::Instant;

use glam::Vec2;

use crate::camera::CameraController;
use crate::error::HelixError;
use crate::gpu::render_context::RenderContext;
use crate::layout::{self, InstanceBuffers};
use crate::model::{Sequence, ViewState, MAX_LENGTH};
use crate::options::Options;
use crate::renderer::{
    self, DrawBindGroups, GridRenderer, InstancePass, Mesh, PipelineLayouts,
    Rotator,
};
use crate::util::Lighting;

/// Compact fingerprint of everything the layout depends on. Two equal keys
/// mean the instance buffers would come out bit-identical, so the recompute
/// is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    sequence_rev: u64,
    twist_bits: u32,
    flash_active: bool,
}

/// The engine: GPU resources, renderers, and the helix model.
pub struct HelixEngine {
    context: RenderContext,
    camera: CameraController,
    lighting: Lighting,
    rotator: Rotator,
    grid: GridRenderer,
    bases_pass: InstancePass,
    backbone_pass: InstancePass,
    bonds_pass: InstancePass,
    depth_view: wgpu::TextureView,

    options: Options,
    view_state: ViewState,
    sequence: Sequence,
    /// Bumped on every sequence replacement; part of the layout key.
    sequence_rev: u64,
    last_layout: Option<LayoutKey>,
}

impl HelixEngine {
    /// Create the engine over the given window surface.
    ///
    /// # Errors
    ///
    /// `Gpu` if wgpu initialization fails, `LengthOutOfRange` if the preset
    /// initial length escapes its clamp (not reachable through
    /// [`Options`] loading).
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: Options,
    ) -> Result<Self, HelixError> {
        let context = RenderContext::new(window, initial_size).await?;

        let camera = CameraController::new(&context, &options.camera);
        let lighting = Lighting::new(&context, &options.lighting);
        let rotator = Rotator::new(&context);
        let grid = GridRenderer::new(&context, &camera.layout);

        let layouts = PipelineLayouts {
            camera: &camera.layout,
            lighting: &lighting.layout,
            rotator: &rotator.layout,
        };

        let [bw, bh, bd] = layout::BASE_SIZE;
        let bases_pass = InstancePass::new(
            &context,
            "Base",
            &Mesh::slab(bw, bh, bd),
            MAX_LENGTH * 2,
            &layouts,
        );
        let backbone_pass = InstancePass::new(
            &context,
            "Backbone",
            &Mesh::uv_sphere(layout::BACKBONE_RADIUS, 16, 16),
            MAX_LENGTH * 2,
            &layouts,
        );
        let bonds_pass = InstancePass::new(
            &context,
            "Bond",
            &Mesh::cylinder(layout::BOND_RADIUS, 1.0, 8),
            MAX_LENGTH * 3,
            &layouts,
        );

        let depth_view = renderer::create_depth_view(&context);

        let view_state = options.helix.initial_view_state();
        let sequence =
            Sequence::generate(view_state.length, &mut rand::rng())?;
        log::info!(
            "engine ready: {} bp, twist {}°",
            view_state.length,
            view_state.twist
        );

        Ok(Self {
            context,
            camera,
            lighting,
            rotator,
            grid,
            bases_pass,
            backbone_pass,
            bonds_pass,
            depth_view,
            options,
            view_state,
            sequence,
            sequence_rev: 0,
            last_layout: None,
        })
    }

    // ── Accessors ──

    /// Runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current view parameters.
    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Current sequence.
    #[must_use]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    // ── Model commands ──

    /// Replace the sequence and bump the revision so the next update
    /// recomputes the layout.
    fn replace_sequence(&mut self, sequence: Sequence) {
        self.sequence = sequence;
        self.sequence_rev += 1;
    }

    /// Set the sequence length, clamped to the supported range. Existing
    /// pairs are preserved; growth appends random pairs.
    pub fn set_length(&mut self, length: usize) {
        let mut target = self.view_state;
        target.set_length(length);
        if target.length == self.view_state.length {
            return;
        }
        self.view_state.length = target.length;
        match self
            .sequence
            .clone()
            .resize(target.length, &mut rand::rng())
        {
            Ok(seq) => {
                self.replace_sequence(seq);
                log::debug!("length -> {}", target.length);
            }
            Err(e) => log::error!("resize rejected: {e}"),
        }
    }

    /// Set the twist angle, clamped to the supported range.
    pub fn set_twist(&mut self, twist: f32) {
        self.view_state.set_twist(twist);
    }

    /// Toggle the continuous spin.
    pub fn toggle_spin(&mut self) {
        self.view_state.auto_spin = !self.view_state.auto_spin;
        log::debug!(
            "auto spin {}",
            if self.view_state.auto_spin { "on" } else { "off" }
        );
    }

    /// Adjust the spin speed, clamped to the supported range.
    pub fn set_spin_speed(&mut self, speed: f32) {
        self.view_state.set_spin_speed(speed);
    }

    /// Randomize ~10% of the pairs with a highlight flash.
    pub fn mutate(&mut self) {
        let now = Instant::now();
        let mutated = self.sequence.mutate(&mut rand::rng(), now);
        self.replace_sequence(mutated);
        log::debug!("mutated sequence (rev {})", self.sequence_rev);
    }

    /// Regenerate the whole sequence at the current length.
    pub fn new_sequence(&mut self) {
        match Sequence::generate(self.view_state.length, &mut rand::rng()) {
            Ok(seq) => self.replace_sequence(seq),
            Err(e) => log::error!("regenerate rejected: {e}"),
        }
    }

    /// Reset the orbital camera to its home position.
    pub fn recenter_camera(&mut self) {
        self.camera.recenter();
    }

    // ── Input plumbing ──

    /// Primary mouse button press/release (starts/ends a drag).
    pub fn handle_mouse_button(&mut self, pressed: bool) {
        self.camera.mouse_pressed = pressed;
    }

    /// Mouse movement in physical pixels; drags rotate, shift-drags pan.
    pub fn handle_mouse_move(&mut self, delta_x: f32, delta_y: f32) {
        if !self.camera.mouse_pressed {
            return;
        }
        let delta = Vec2::new(delta_x, delta_y);
        if self.camera.shift_pressed {
            self.camera.pan(delta);
        } else {
            self.camera.rotate(delta);
        }
    }

    /// Scroll wheel zoom (positive = closer).
    pub fn handle_mouse_wheel(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    /// Track the shift modifier for pan-vs-rotate drags.
    pub fn update_modifiers(&mut self, shift: bool) {
        self.camera.shift_pressed = shift;
    }

    // ── Per-frame ──

    /// Advance per-frame state: spin, camera upload, and the dirty-checked
    /// layout refresh.
    pub fn update(&mut self, dt: f32) {
        if self.view_state.auto_spin {
            self.rotator.advance(
                &self.context.queue,
                self.view_state.spin_speed,
                dt,
            );
        }
        self.camera.update_gpu(&self.context.queue);
        self.refresh_layout(Instant::now());
    }

    /// Recompute and upload instance buffers if anything they depend on
    /// changed. Purely an optimization: the layout itself is safe to run
    /// every frame.
    fn refresh_layout(&mut self, now: Instant) {
        let key = LayoutKey {
            sequence_rev: self.sequence_rev,
            twist_bits: self.view_state.twist.to_bits(),
            flash_active: self.sequence.any_flashing(now),
        };
        if self.last_layout == Some(key) {
            return;
        }

        let buffers = layout::compute(
            &self.sequence,
            self.view_state.twist,
            &self.options.colors,
            now,
        );
        self.upload(&buffers);
        self.last_layout = Some(key);
        log::debug!(
            "layout: {} bases, {} backbone, {} bonds",
            buffers.bases.len(),
            buffers.backbone.len(),
            buffers.bonds.len()
        );
    }

    fn upload(&mut self, buffers: &InstanceBuffers) {
        let device = &self.context.device;
        let queue = &self.context.queue;
        let raw = |instances: &[crate::layout::Instance]| {
            instances
                .iter()
                .map(crate::layout::Instance::to_raw)
                .collect::<Vec<_>>()
        };
        self.bases_pass
            .write_instances(device, queue, &raw(&buffers.bases));
        self.backbone_pass
            .write_instances(device, queue, &raw(&buffers.backbone));
        self.bonds_pass
            .write_instances(device, queue, &raw(&buffers.bonds));
    }

    /// Handle a window resize: surface, camera aspect, and depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.camera.resize(width, height);
        self.depth_view = renderer::create_depth_view(&self.context);
    }

    /// Render one frame.
    ///
    /// # Errors
    ///
    /// Propagates [`wgpu::SurfaceError`] (lost/outdated surfaces are
    /// recoverable by resizing).
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let [r, g, b] = self.options.colors.background;
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            self.grid.draw(&mut render_pass, &self.camera.bind_group);

            let bind_groups = DrawBindGroups {
                camera: &self.camera.bind_group,
                lighting: &self.lighting.bind_group,
                rotator: &self.rotator.bind_group,
            };
            self.backbone_pass.draw(&mut render_pass, &bind_groups);
            self.bases_pass.draw(&mut render_pass, &bind_groups);
            // Translucent bonds draw last over the opaque geometry.
            self.bonds_pass.draw(&mut render_pass, &bind_groups);
        }
        self.context.submit(encoder);
        frame.present();

        Ok(())
    }
}
