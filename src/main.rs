//! sol3d - a textured Sun/Earth/Moon orrery
//!
//! Opens a window, draws the bodies of the configured scene and animates
//! their orbits. Orbit and camera speeds are adjusted from the keyboard.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use sol3d::config::AppConfig;
use sol3d::input::{InputAction, InputMapper};
use sol3d::scene::{load_scene, SceneBuilder};
use sol3d::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};
use sol3d_core::OrbitalSystem;
use sol3d_input::OrbitController;
use sol3d_render::Camera;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    simulation: SimulationSystem,
    system: OrbitalSystem,
    camera: Camera,
    controller: OrbitController,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let scene = load_scene(config.scene.path.as_deref());
        let system = OrbitalSystem::from_scene(&scene)
            .or_else(|e| {
                log::warn!("Failed to build scene '{}': {}. Using the built-in solar system.", scene.name, e);
                OrbitalSystem::from_scene(&SceneBuilder::solar_system())
            })
            .unwrap_or_else(|e| {
                log::error!("Failed to build the built-in solar system: {}", e);
                OrbitalSystem::new()
            })
            .with_speed_targets(&config.orbit.primary_body, &config.orbit.secondary_body);

        let camera = Camera::new(config.camera.distance);
        let controller = OrbitController::new()
            .with_limits(config.orbit.limits())
            .with_camera_rotation_speed(config.camera.rotation_speed);
        let simulation = SimulationSystem::new(config.orbit.reference_rate);

        Self {
            config,
            window_system: None,
            render_system: None,
            simulation,
            system,
            camera,
            controller,
        }
    }

    /// Names and speeds shown in the title bar
    fn title_speeds(&self) -> [(&str, Option<f32>); 2] {
        let primary = &self.config.orbit.primary_body;
        let secondary = &self.config.orbit.secondary_body;
        [
            (primary.as_str(), self.system.orbit_speed(primary)),
            (secondary.as_str(), self.system.orbit_speed(secondary)),
        ]
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleFullscreen => {
                if let Some(window_system) = &self.window_system {
                    window_system.toggle_fullscreen();
                }
            }
            InputAction::ResetView => {
                self.camera.reset();
                log::info!("Camera reset to starting view");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_system.is_some() {
            return;
        }

        let window_system = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window_system) => window_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut render_system = match RenderSystem::new(
            window_system.window().clone(),
            self.config.rendering.clone(),
            self.config.camera.clone(),
            self.config.window.vsync,
        ) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to set up rendering: {}", e);
                event_loop.exit();
                return;
            }
        };
        render_system.upload_system(&self.system);

        window_system.update_title(&self.title_speeds());
        window_system.request_redraw();
        self.simulation.reset_clock();

        self.window_system = Some(window_system);
        self.render_system = Some(render_system);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    match InputMapper::map_keyboard(key, event.state) {
                        Some(action) => self.handle_action(action, event_loop),
                        None => {
                            self.controller.process_keyboard(key, event.state);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let result = self.simulation.update(&mut self.system, &mut self.camera, &mut self.controller);

                if result.speeds_changed {
                    if let Some(window_system) = &self.window_system {
                        window_system.update_title(&self.title_speeds());
                    }
                    log::debug!("Speeds now {:?}", self.title_speeds());
                }

                if let Some(render_system) = &mut self.render_system {
                    match render_system.render_frame(&self.system, &self.camera) {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => render_system.recover_surface(),
                        Err(RenderError::OutOfMemory) => {
                            log::error!("{}", RenderError::OutOfMemory);
                            event_loop.exit();
                            return;
                        }
                        Err(e) => log::warn!("{}", e),
                    }
                }

                // Request next frame
                if let Some(window_system) = &self.window_system {
                    window_system.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    let config = AppConfig::load();

    // RUST_LOG wins over the configured level
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting sol3d");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
