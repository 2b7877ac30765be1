use std::path::Path;
use std::sync::Arc;

use helixlab::engine::HelixEngine;
use helixlab::options::Options;
use helixlab::util::FrameTiming;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

struct HelixApp {
    window: Option<Arc<Window>>,
    engine: Option<HelixEngine>,
    last_mouse_pos: (f32, f32),
    timing: FrameTiming,
    options: Options,
}

impl HelixApp {
    fn new(options: Options) -> Self {
        Self {
            window: None,
            engine: None,
            last_mouse_pos: (0.0, 0.0),
            timing: FrameTiming::new(),
            options,
        }
    }
}

impl ApplicationHandler for HelixApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let monitor = event_loop
                .primary_monitor()
                .or_else(|| event_loop.available_monitors().next());
            let attrs = if let Some(mon) = &monitor {
                let mon_size = mon.size();
                let scale = mon.scale_factor();
                let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
                let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
                Window::default_attributes()
                    .with_title("Helixlab")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        logical_w, logical_h,
                    ))
            } else {
                Window::default_attributes().with_title("Helixlab")
            };
            let window = Arc::new(event_loop.create_window(attrs).unwrap());

            let size = window.inner_size();
            let engine = match pollster::block_on(HelixEngine::new(
                window.clone(),
                (size.width, size.height),
                self.options.clone(),
            )) {
                Ok(engine) => engine,
                Err(e) => {
                    log::error!("engine initialization failed: {e}");
                    event_loop.exit();
                    return;
                }
            };

            window.request_redraw();
            self.window = Some(window);
            self.engine = Some(engine);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(event_size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(event_size.width, event_size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    let dt = self.timing.tick();
                    engine.update(dt);

                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = window.inner_size();
                            engine.resize(inner.width, inner.height);
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    window.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(engine) = &mut self.engine {
                    if button == winit::event::MouseButton::Left {
                        engine
                            .handle_mouse_button(state == ElementState::Pressed);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let delta_x = position.x as f32 - self.last_mouse_pos.0;
                let delta_y = position.y as f32 - self.last_mouse_pos.1;

                if let Some(engine) = &mut self.engine {
                    engine.handle_mouse_move(delta_x, delta_y);
                }

                self.last_mouse_pos = (position.x as f32, position.y as f32);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    match delta {
                        MouseScrollDelta::LineDelta(_, y) => {
                            engine.handle_mouse_wheel(y);
                        }
                        MouseScrollDelta::PixelDelta(pos) => {
                            engine.handle_mouse_wheel(pos.y as f32 * 0.01);
                        }
                    }
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    engine.update_modifiers(modifiers.state().shift_key());
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let Some(engine) = &mut self.engine {
                        use winit::keyboard::PhysicalKey;
                        if let PhysicalKey::Code(code) = event.physical_key {
                            let key_str = format!("{code:?}");
                            if let Some(action) =
                                engine.options().keybindings.lookup(&key_str)
                            {
                                engine.apply_action(action);
                            }
                        }
                    }
                }
            }

            _ => (),
        }
    }
}

fn load_options() -> Options {
    match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => {
                log::info!("loaded options preset {path}");
                options
            }
            Err(e) => {
                log::error!("failed to load {path}: {e}; using defaults");
                Options::default()
            }
        },
        None => Options::default(),
    }
}

fn main() {
    env_logger::init();

    let options = load_options();

    let mut app = HelixApp::new(options);
    let event_loop = EventLoop::new().unwrap();

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app).expect("Event loop error");
}
