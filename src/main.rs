//! Vantage - first-person scene walkthrough
//!
//! A small walkthrough demo: three textured boxes orbit a spinning globe,
//! viewed through a first-person camera with acceleration/drag kinematics.
//! Escape toggles between the locked cursor (walk mode) and the regular
//! desktop cursor.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Fullscreen, Window, WindowId},
};

use vantage_core::{Camera, CursorFilter, Vec3};
use vantage_input::CameraController;
use vantage_render::{RenderContext, SceneRenderer};

use vantage::config::AppConfig;
use vantage::input::{InputAction, InputMapper};
use vantage::scene::{build_demo_scene, DemoScene};
use vantage::systems::SimulationSystem;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    renderer: Option<SceneRenderer>,
    demo: Option<DemoScene>,
    camera: Camera,
    controller: CameraController,
    cursor_filter: CursorFilter,
    simulation: SimulationSystem,
    /// Cursor captured and camera Free; toggled by Escape
    freelook: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let camera = Camera::new()
            .with_position(Vec3::from(config.camera.start_position))
            .with_kinematics(
                config.camera.max_speed,
                config.camera.accel_rate,
                config.camera.decel_rate,
            )
            .with_sensitivity(config.camera.sensitivity)
            .with_fov(config.camera.fov);

        Self {
            config,
            window: None,
            render_context: None,
            renderer: None,
            demo: None,
            camera,
            controller: CameraController::new(),
            cursor_filter: CursorFilter::new(),
            simulation: SimulationSystem::new(),
            freelook: false,
        }
    }

    /// Flip between walk mode (cursor captured, camera Free) and desktop
    /// mode (cursor released, camera Locked)
    fn toggle_freelook(&mut self) {
        let Some(window) = &self.window else {
            return;
        };

        if self.freelook {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
            self.freelook = false;
            log::info!("Cursor released - Escape to walk");
        } else {
            // Try Locked mode first (best for FPS), fall back to Confined
            let grab_result = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

            if grab_result.is_ok() {
                window.set_cursor_visible(false);
                self.freelook = true;
                log::info!("Cursor captured - Escape to release");
            } else {
                log::warn!("Failed to capture cursor");
            }
        }

        self.camera.can_move = self.freelook;
        // The grab warps the cursor; reseed so the warp is not look input
        self.cursor_filter.reseed(self.controller.cursor_position());
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            let new_fullscreen = if window.fullscreen().is_some() {
                None
            } else {
                Some(Fullscreen::Borderless(None))
            };
            window.set_fullscreen(new_fullscreen);
        }
    }

    /// One frame: filter cursor input, step the camera, animate the scene,
    /// submit draws
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.simulation.begin_frame();

        let look_delta = self.cursor_filter.sample(self.controller.cursor_position());
        self.camera.update(dt, self.controller.keys(), look_delta);

        if let Some(demo) = &mut self.demo {
            self.simulation.animate(demo, dt);
        }

        if let Some(window) = &self.window {
            let pos = self.camera.position;
            let hint = if self.freelook { "Esc to release" } else { "Esc to walk" };
            window.set_title(&format!(
                "{} - ({:.1}, {:.1}, {:.1}) [{}]",
                self.config.window.title, pos.x, pos.y, pos.z, hint
            ));
        }

        let (Some(ctx), Some(renderer), Some(demo)) = (
            &mut self.render_context,
            &mut self.renderer,
            &self.demo,
        ) else {
            return;
        };

        self.camera
            .update_projection(ctx.config.width, ctx.config.height);

        match renderer.render(
            ctx,
            &demo.scene,
            &self.camera,
            self.config.rendering.background_color,
        ) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let size = ctx.size;
                ctx.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let mut window_attributes = Window::default_attributes()
                .with_title(&self.config.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                ));

            if self.config.window.fullscreen {
                window_attributes =
                    window_attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = Arc::new(
                event_loop
                    .create_window(window_attributes)
                    .expect("Failed to create window"),
            );

            let render_context = pollster::block_on(RenderContext::with_vsync(
                window.clone(),
                self.config.window.vsync,
            ));

            let mut renderer = SceneRenderer::new(&render_context.device);
            let demo = build_demo_scene(
                &render_context,
                &mut renderer,
                &PathBuf::from(&self.config.scene.texture_dir),
            );

            window.request_redraw();

            self.window = Some(window);
            self.render_context = Some(render_context);
            self.renderer = Some(renderer);
            self.demo = Some(demo);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(ctx) = &mut self.render_context {
                    ctx.resize(physical_size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match InputMapper::map_keyboard(key, event.state) {
                        Some(InputAction::ToggleFreelook) => {
                            self.toggle_freelook();
                            return;
                        }
                        Some(InputAction::ToggleFullscreen) => {
                            self.toggle_fullscreen();
                            return;
                        }
                        None => {}
                    }
                    // Pass to controller for movement keys
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                // While the cursor is grabbed, device deltas drive the
                // virtual position instead
                if !self.freelook {
                    self.controller.process_cursor_moved(position.x, position.y);
                }
            }

            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.freelook {
                self.controller.process_mouse_motion(delta.0, delta.1);
            }
        }
    }
}

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Vantage");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
