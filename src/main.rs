//! Volumetric Tetrahedra
//!
//! Opens a window and draws two lit, animated tetrahedra until closed.

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use tetra_scene::config::AppConfig;
use tetra_scene::scene::Scene;
use tetra_scene::systems::{AnimationSystem, RenderError, RenderSystem, WindowSystem};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    scene: Scene,
    window_system: Option<WindowSystem>,
    render_system: Option<RenderSystem>,
    animation: AnimationSystem,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let scene = Scene::from_config(&config);
        log::info!(
            "Scene has {} objects, camera at {:?}, light at {:?}",
            scene.objects.len(),
            scene.camera.eye,
            scene.light.position
        );

        Self {
            config,
            scene,
            window_system: None,
            render_system: None,
            animation: AnimationSystem::new(),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => {
                log::info!("Escape pressed, closing");
                event_loop.exit();
            }
            KeyCode::KeyF => {
                if let Some(window_system) = &self.window_system {
                    window_system.toggle_fullscreen();
                }
            }
            KeyCode::KeyR => {
                log::info!("Restarting animation");
                self.animation.reset();
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let t = self.animation.tick();

        if let Some(render_system) = &mut self.render_system {
            match render_system.render_frame(&self.scene, t) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render_system.recover_surface(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window_system) = &self.window_system {
            window_system.request_redraw();
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

        let render_system = match RenderSystem::new(
            window_system.window().clone(),
            self.config.window.vsync,
            &self.scene,
        ) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialise rendering: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = render_system.size();
        log::info!("Rendering at {}x{}", width, height);

        // Time starts once there is something to look at
        self.animation.reset();
        window_system.request_redraw();
        self.window_system = Some(window_system);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

/// Log filter: RUST_LOG wins, otherwise the configured level with noisy wgpu internals capped
fn log_filter(config: &AppConfig) -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!("{},wgpu_core=warn,wgpu_hal=warn", config.debug.log_level)
    })
}

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging
    env_logger::Builder::new()
        .parse_filters(&log_filter(&config))
        .init();
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting {}", config.window.title);

    // Create event loop
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
