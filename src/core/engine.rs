//! Core Engine struct and main game loop

use std::sync::Arc;
use std::time::Duration;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::core::{FrameContext, LudiError, Time};
use crate::object::Color;
use crate::render::{Canvas, FrameBuffer, Renderer};
use crate::world::{GameRegistry, StepReport};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Window title
    pub title: String,
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Enable VSync
    pub vsync: bool,
    /// Color the surface is cleared to before each frame
    pub clear_color: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: String::from("Deus Ludi"),
            width: 1800,
            height: 1000,
            vsync: true,
            clear_color: Color::WHITE,
        }
    }
}

impl EngineConfig {
    /// Create a new config with a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set window dimensions
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enable or disable VSync
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Set the per-frame clear color
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }
}

/// Drives the active game of a registry, one frame at a time
pub struct Engine {
    config: EngineConfig,
    registry: GameRegistry,
    time: Time,
    renderer: Option<Renderer>,
    window: Option<Arc<Window>>,
    /// Set once a frame-level problem has been logged, to avoid log spam
    reported_idle: bool,
    /// Fatal setup failure surfaced from `run`
    failure: Option<String>,
}

impl Engine {
    /// Create a new engine driving `registry`
    pub fn new(config: EngineConfig, registry: GameRegistry) -> Self {
        Self {
            config,
            registry,
            time: Time::new(),
            renderer: None,
            window: None,
            reported_idle: false,
            failure: None,
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut GameRegistry {
        &mut self.registry
    }

    /// Open a window and run until it is closed
    ///
    /// # Errors
    ///
    /// Fails if the event loop, window or renderer cannot be created.
    pub fn run(mut self) -> anyhow::Result<()> {
        log::info!("Starting engine: {}", self.config.title);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;

        match self.failure.take() {
            Some(message) => Err(anyhow::anyhow!(message)),
            None => Ok(()),
        }
    }

    /// Run `frames` frames against an off-screen buffer at a fixed 60 Hz step
    ///
    /// Returns the buffer holding the last frame and the summed step report.
    ///
    /// # Errors
    ///
    /// `NoActiveScene` if the active game has no active scene.
    pub fn run_headless(&mut self, frames: u64) -> Result<(FrameBuffer, StepReport), LudiError> {
        let mut canvas = FrameBuffer::new(self.config.width, self.config.height);
        let mut total = StepReport::default();
        let step = Duration::from_secs(1) / 60;

        log::info!("Running {} headless frame(s)", frames);
        for _ in 0..frames {
            self.time.advance(step);
            total += self.frame(&mut canvas)?;
        }
        Ok((canvas, total))
    }

    /// One frame: clear, step the active game
    fn frame(&mut self, canvas: &mut dyn Canvas) -> Result<StepReport, LudiError> {
        canvas.clear(self.config.clear_color);

        let Some(game) = self.registry.active_mut() else {
            return Ok(StepReport::default());
        };
        let mut ctx = FrameContext::new(canvas, self.time.delta_seconds(), self.time.frame_count());
        game.run(&mut ctx)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, message: String) {
        log::error!("{}", message);
        self.failure = Some(message);
        event_loop.exit();
    }
}

impl ApplicationHandler for Engine {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, format!("Failed to create window: {e}")),
        };

        let renderer = match pollster::block_on(Renderer::new(Arc::clone(&window), self.config.vsync))
        {
            Ok(renderer) => renderer,
            Err(e) => return self.fail(event_loop, format!("Failed to create renderer: {e}")),
        };

        self.renderer = Some(renderer);
        self.window = Some(window);
        log::info!("Engine initialized successfully");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                self.time.update();

                let Some(mut renderer) = self.renderer.take() else {
                    return;
                };
                match self.frame(&mut renderer) {
                    Ok(_) => self.reported_idle = false,
                    Err(e) if !self.reported_idle => {
                        log::warn!("Nothing to run this frame: {e}");
                        self.reported_idle = true;
                    }
                    Err(_) => {}
                }
                renderer.present();
                self.renderer = Some(renderer);

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
