//! On-screen backend: software frames shown in `winit` windows.
//!
//! The event loop is pumped without blocking from `poll_event` and
//! `create_window`, so the engine's frame loop stays in charge of timing.

use crate::software::SoftwareBackend;
use std::collections::{HashMap, VecDeque};
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;
use teacup_core::{
    Backend, BackendError, BackendResult, Color, Event, FontFace, Rect, RendererId, TextTexture,
    TextureId, WindowId,
};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Icon, Window as WinitWindow, WindowId as WinitWindowId};

type Surface = softbuffer::Surface<Rc<WinitWindow>, Rc<WinitWindow>>;

struct NativeWindow {
    window: Rc<WinitWindow>,
    surface: Surface,
    _context: softbuffer::Context<Rc<WinitWindow>>,
}

/// A window requested by `create_window`, opened on the next pump.
struct PendingWindow {
    id: WindowId,
    title: String,
    size: (u32, u32),
}

/// Event loop side of the backend.
#[derive(Default)]
struct NativeState {
    pending: Vec<PendingWindow>,
    failed: Vec<(WindowId, String)>,
    windows: HashMap<WindowId, NativeWindow>,
    ids: HashMap<WinitWindowId, WindowId>,
    events: VecDeque<Event>,
}

impl NativeState {
    fn open_pending(&mut self, event_loop: &ActiveEventLoop) {
        for request in std::mem::take(&mut self.pending) {
            let attributes = WinitWindow::default_attributes()
                .with_title(&request.title)
                .with_inner_size(PhysicalSize::new(request.size.0, request.size.1))
                .with_resizable(false);
            match open_window(event_loop, attributes) {
                Ok(native) => {
                    log::debug!("Native window for {} is up", request.id);
                    self.ids.insert(native.window.id(), request.id);
                    self.windows.insert(request.id, native);
                }
                Err(reason) => self.failed.push((request.id, reason)),
            }
        }
    }
}

fn open_window(
    event_loop: &ActiveEventLoop,
    attributes: winit::window::WindowAttributes,
) -> Result<NativeWindow, String> {
    let window = Rc::new(
        event_loop
            .create_window(attributes)
            .map_err(|e| e.to_string())?,
    );
    let context = softbuffer::Context::new(window.clone()).map_err(|e| e.to_string())?;
    let surface = softbuffer::Surface::new(&context, window.clone()).map_err(|e| e.to_string())?;
    Ok(NativeWindow {
        window,
        surface,
        _context: context,
    })
}

impl ApplicationHandler for NativeState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.open_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.open_pending(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WinitWindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            match self.ids.get(&window_id) {
                Some(&id) => self.events.push_back(Event::WindowClose(id)),
                None => log::debug!("Close request for untracked window {:?}", window_id),
            }
        }
    }
}

/// Opens real windows and presents [`SoftwareBackend`] frames in them.
pub struct NativeBackend {
    event_loop: EventLoop<()>,
    state: NativeState,
    software: SoftwareBackend,
    exited: bool,
}

impl NativeBackend {
    pub fn new() -> BackendResult<Self> {
        let event_loop = EventLoop::new().map_err(|e| BackendError::Other(e.to_string()))?;
        Ok(Self {
            event_loop,
            state: NativeState::default(),
            software: SoftwareBackend::new(),
            exited: false,
        })
    }

    /// Frames and textures behind the windows.
    pub fn software(&self) -> &SoftwareBackend {
        &self.software
    }

    /// Set a window's icon from RGBA8 pixels.
    pub fn set_window_icon(
        &mut self,
        window: WindowId,
        rgba: Vec<u8>,
        width: u32,
        height: u32,
    ) -> BackendResult<()> {
        let icon =
            Icon::from_rgba(rgba, width, height).map_err(|e| BackendError::Other(e.to_string()))?;
        let native = self
            .state
            .windows
            .get(&window)
            .ok_or_else(|| BackendError::Other(format!("no native window {}", window)))?;
        native.window.set_window_icon(Some(icon));
        Ok(())
    }

    fn pump(&mut self) {
        if self.exited {
            return;
        }
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state);
        if let PumpStatus::Exit(code) = status {
            log::info!("Event loop exited ({})", code);
            self.exited = true;
            self.state.events.push_back(Event::Quit);
        }
    }

    fn release_software(&mut self, window: WindowId, renderer: RendererId) {
        self.software.destroy_renderer(renderer);
        self.software.destroy_window(window);
    }
}

impl Backend for NativeBackend {
    fn create_window(
        &mut self,
        title: &str,
        size: (u32, u32),
    ) -> BackendResult<(WindowId, RendererId)> {
        let (id, renderer) = self.software.create_window(title, size)?;
        self.state.pending.push(PendingWindow {
            id,
            title: title.to_string(),
            size,
        });
        self.pump();

        if let Some(index) = self.state.failed.iter().position(|(failed, _)| *failed == id) {
            let (_, reason) = self.state.failed.remove(index);
            self.release_software(id, renderer);
            return Err(BackendError::WindowCreation(reason));
        }
        if !self.state.windows.contains_key(&id) {
            self.state.pending.retain(|pending| pending.id != id);
            self.release_software(id, renderer);
            return Err(BackendError::WindowCreation(format!(
                "event loop did not open '{}'",
                title
            )));
        }
        Ok((id, renderer))
    }

    fn destroy_renderer(&mut self, renderer: RendererId) {
        self.software.destroy_renderer(renderer);
    }

    fn destroy_window(&mut self, window: WindowId) {
        if let Some(native) = self.state.windows.remove(&window) {
            self.state.ids.remove(&native.window.id());
        }
        self.software.destroy_window(window);
    }

    fn poll_event(&mut self) -> Option<Event> {
        if self.state.events.is_empty() {
            self.pump();
        }
        self.state.events.pop_front()
    }

    fn set_draw_color(&mut self, renderer: RendererId, color: Color) {
        self.software.set_draw_color(renderer, color);
    }

    fn clear(&mut self, renderer: RendererId) {
        self.software.clear(renderer);
    }

    fn fill_rect(&mut self, renderer: RendererId, rect: Rect) {
        self.software.fill_rect(renderer, rect);
    }

    fn draw_line(&mut self, renderer: RendererId, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.software.draw_line(renderer, x0, y0, x1, y1);
    }

    fn present(&mut self, renderer: RendererId) -> BackendResult<()> {
        self.software.present(renderer)?;
        let window = self
            .software
            .renderer_window(renderer)
            .ok_or(BackendError::UnknownRenderer(renderer))?;
        let Some(native) = self.state.windows.get_mut(&window) else {
            return Ok(());
        };
        let frame = self
            .software
            .snapshot(renderer)
            .ok_or(BackendError::UnknownRenderer(renderer))?;
        let (Some(width), Some(height)) =
            (NonZeroU32::new(frame.width()), NonZeroU32::new(frame.height()))
        else {
            return Ok(());
        };

        native
            .surface
            .resize(width, height)
            .map_err(|e| BackendError::Present(e.to_string()))?;
        let mut buffer = native
            .surface
            .buffer_mut()
            .map_err(|e| BackendError::Present(e.to_string()))?;
        // softbuffer wants 0RGB.
        for (dst, &src) in buffer.iter_mut().zip(frame.pixels()) {
            *dst = src & 0x00FF_FFFF;
        }
        buffer
            .present()
            .map_err(|e| BackendError::Present(e.to_string()))
    }

    fn render_text(
        &mut self,
        renderer: RendererId,
        font: &FontFace,
        color: Color,
        text: &str,
    ) -> BackendResult<TextTexture> {
        self.software.render_text(renderer, font, color, text)
    }

    fn copy_texture(&mut self, renderer: RendererId, texture: TextureId, dest: Rect) {
        self.software.copy_texture(renderer, texture, dest);
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.software.destroy_texture(texture);
    }
}
