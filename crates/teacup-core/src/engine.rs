//! The engine: a backend, the window registry and the frame loop.

use crate::backend::{Backend, Event, WindowId};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::font::FontRegistry;
use crate::objects::SceneObject;
use crate::registry::Registry;
use crate::style::{Style, StyleOverrides};
use crate::window::Window;
use std::time::{Duration, Instant};

/// Owns the backend and every open window.
///
/// Single threaded: windows and objects are only touched by the caller
/// between (or during) calls to [`Engine::step`].
pub struct Engine<B: Backend> {
    backend: B,
    registry: Registry,
    fonts: FontRegistry,
    config: EngineConfig,
}

impl<B: Backend> Engine<B> {
    /// Start the engine with the default configuration.
    pub fn init(backend: B) -> Self {
        Self::with_config(backend, EngineConfig::default())
    }

    pub fn with_config(backend: B, config: EngineConfig) -> Self {
        let fonts = config.font_registry();
        log::info!(
            "Engine started ({} fonts, target {} fps)",
            fonts.len(),
            config.target_fps
        );
        Self {
            backend,
            registry: Registry::new(),
            fonts,
            config,
        }
    }

    /// Destroy every remaining window and hand the backend back.
    pub fn done(mut self) -> B {
        let remaining = self.registry.len();
        self.registry.destroy_all(&mut self.backend);
        log::info!("Engine stopped ({} windows destroyed)", remaining);
        self.backend
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// True while any window is registered.
    pub fn running(&self) -> bool {
        self.registry.running()
    }

    /// Open and register a window.
    ///
    /// Its style is the template, then the configured window style, then
    /// `style`.
    pub fn create_window(
        &mut self,
        title: &str,
        size: (u32, u32),
        style: &StyleOverrides,
    ) -> EngineResult<WindowId> {
        let style = Style::default()
            .merged(&self.config.window_style)
            .merged(style);
        let window = Window::open(&mut self.backend, title, size, style)?;
        let id = window.id();
        if let Some(mut duplicate) = self.registry.register(window) {
            log::warn!("Backend reused window id {}", id);
            duplicate.destroy(&mut self.backend);
        }
        Ok(id)
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.registry.get(id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.registry.get_mut(id)
    }

    /// Attach an object to a registered window and return its draw index.
    pub fn attach(&mut self, id: WindowId, object: impl Into<SceneObject>) -> EngineResult<usize> {
        let window = self
            .registry
            .get_mut(id)
            .ok_or(EngineError::UnknownWindow(id))?;
        window.attach(&mut self.backend, &self.fonts, object)
    }

    /// Destroy a window now. Returns `false` if it was not registered.
    pub fn destroy_window(&mut self, id: WindowId) -> bool {
        self.registry.destroy(id, &mut self.backend)
    }

    /// Block for `ms` milliseconds.
    pub fn sleep(&mut self, ms: u64) {
        self.backend.delay(Duration::from_millis(ms));
    }

    /// Run one frame: handle events, drop closed windows, draw the rest and
    /// pace to `target_fps`.
    ///
    /// Returns the frame's delta time. With `target_fps == 0` that is the
    /// measured time of the frame. Otherwise it is the frame budget
    /// `1 / target_fps`, or the measured time when the frame overran it.
    pub fn step(&mut self, target_fps: u32) -> Duration {
        let start = Instant::now();

        self.dispatch_events();
        let closed = self.registry.destroy_closed(&mut self.backend);
        if closed > 0 {
            log::debug!("Destroyed {} closed windows", closed);
        }

        for window in self.registry.iter_mut() {
            if window.is_open() {
                window.draw(&mut self.backend, &self.fonts);
            }
        }

        let elapsed = start.elapsed();
        log::trace!("Frame took {:?}", elapsed);
        self.pace(elapsed, target_fps)
    }

    /// [`Engine::step`] at the configured frame rate.
    pub fn run_frame(&mut self) -> Duration {
        self.step(self.config.target_fps)
    }

    fn dispatch_events(&mut self) {
        while let Some(event) = self.backend.poll_event() {
            match event {
                Event::WindowClose(id) => {
                    if !self.registry.destroy(id, &mut self.backend) {
                        log::debug!("Close event for unknown window {}", id);
                    }
                }
                Event::Quit => {
                    log::info!("Quit requested, closing {} windows", self.registry.len());
                    for window in self.registry.iter_mut() {
                        window.close();
                    }
                }
            }
        }
    }

    fn pace(&mut self, elapsed: Duration, target_fps: u32) -> Duration {
        if target_fps == 0 {
            return elapsed;
        }
        let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps));
        match budget.checked_sub(elapsed) {
            Some(shortfall) if !shortfall.is_zero() => {
                self.backend.delay(shortfall);
                budget
            }
            // Overran: budget plus the overrun.
            _ => elapsed,
        }
    }
}
