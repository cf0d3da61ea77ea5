//! In-memory backend that records every call.

use super::{
    Backend, BackendError, BackendResult, Event, Rect, RendererId, TextTexture, TextureId,
    WindowId,
};
use crate::font::FontFace;
use crate::style::Color;
use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateWindow {
        window: WindowId,
        renderer: RendererId,
        title: String,
        size: (u32, u32),
    },
    DestroyRenderer(RendererId),
    DestroyWindow(WindowId),
    SetDrawColor(RendererId, Color),
    Clear(RendererId),
    FillRect(RendererId, Rect),
    DrawLine(RendererId, i32, i32, i32, i32),
    Present(RendererId),
    RenderText {
        renderer: RendererId,
        font: String,
        size: u32,
        color: Color,
        text: String,
        texture: TextureId,
    },
    CopyTexture(RendererId, TextureId, Rect),
    DestroyTexture(TextureId),
    Delay(Duration),
}

/// Backend with no display, for tests and offscreen runs.
///
/// Events are injected with [`HeadlessBackend::push_event`]; `delay` is
/// recorded instead of sleeping. Rendered text measures `size / 2` pixels per
/// character and `size` pixels high.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    calls: Vec<Call>,
    events: VecDeque<Event>,
    next_id: u32,
    live_windows: BTreeSet<WindowId>,
    live_renderers: BTreeSet<RendererId>,
    live_textures: BTreeSet<TextureId>,
    fail_window_creation: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next `poll_event`.
    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Make every following `create_window` fail.
    pub fn fail_window_creation(&mut self, fail: bool) {
        self.fail_window_creation = fail;
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|&call| pred(call)).count()
    }

    /// Every `fill_rect` as (draw color in effect, rectangle), in call order.
    pub fn filled_rects(&self, renderer: RendererId) -> Vec<(Color, Rect)> {
        let mut color = Color::TRANSPARENT;
        let mut out = Vec::new();
        for call in &self.calls {
            match call {
                Call::SetDrawColor(r, c) if *r == renderer => color = *c,
                Call::FillRect(r, rect) if *r == renderer => out.push((color, *rect)),
                _ => {}
            }
        }
        out
    }

    /// Every `draw_line` as (x0, y0, x1, y1), in call order.
    pub fn lines(&self, renderer: RendererId) -> Vec<(i32, i32, i32, i32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::DrawLine(r, x0, y0, x1, y1) if *r == renderer => Some((*x0, *y0, *x1, *y1)),
                _ => None,
            })
            .collect()
    }

    pub fn is_renderer_live(&self, renderer: RendererId) -> bool {
        self.live_renderers.contains(&renderer)
    }

    pub fn is_window_live(&self, window: WindowId) -> bool {
        self.live_windows.contains(&window)
    }

    pub fn live_textures(&self) -> usize {
        self.live_textures.len()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Backend for HeadlessBackend {
    fn create_window(
        &mut self,
        title: &str,
        size: (u32, u32),
    ) -> BackendResult<(WindowId, RendererId)> {
        if self.fail_window_creation {
            return Err(BackendError::WindowCreation(format!(
                "headless window '{}' refused",
                title
            )));
        }
        let window = WindowId(self.next_id());
        let renderer = RendererId(self.next_id());
        self.live_windows.insert(window);
        self.live_renderers.insert(renderer);
        self.calls.push(Call::CreateWindow {
            window,
            renderer,
            title: title.to_string(),
            size,
        });
        Ok((window, renderer))
    }

    fn destroy_renderer(&mut self, renderer: RendererId) {
        if !self.live_renderers.remove(&renderer) {
            log::warn!("Renderer {:?} released twice", renderer);
        }
        self.calls.push(Call::DestroyRenderer(renderer));
    }

    fn destroy_window(&mut self, window: WindowId) {
        if !self.live_windows.remove(&window) {
            log::warn!("Window {} released twice", window);
        }
        self.calls.push(Call::DestroyWindow(window));
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    fn set_draw_color(&mut self, renderer: RendererId, color: Color) {
        self.calls.push(Call::SetDrawColor(renderer, color));
    }

    fn clear(&mut self, renderer: RendererId) {
        self.calls.push(Call::Clear(renderer));
    }

    fn fill_rect(&mut self, renderer: RendererId, rect: Rect) {
        self.calls.push(Call::FillRect(renderer, rect));
    }

    fn draw_line(&mut self, renderer: RendererId, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.calls.push(Call::DrawLine(renderer, x0, y0, x1, y1));
    }

    fn present(&mut self, renderer: RendererId) -> BackendResult<()> {
        if !self.live_renderers.contains(&renderer) {
            return Err(BackendError::UnknownRenderer(renderer));
        }
        self.calls.push(Call::Present(renderer));
        Ok(())
    }

    fn render_text(
        &mut self,
        renderer: RendererId,
        font: &FontFace,
        color: Color,
        text: &str,
    ) -> BackendResult<TextTexture> {
        if !self.live_renderers.contains(&renderer) {
            return Err(BackendError::UnknownRenderer(renderer));
        }
        let texture = TextureId(self.next_id());
        self.live_textures.insert(texture);
        self.calls.push(Call::RenderText {
            renderer,
            font: font.name.clone(),
            size: font.size,
            color,
            text: text.to_string(),
            texture,
        });
        let chars = text.chars().count() as i32;
        Ok(TextTexture {
            texture,
            width: chars * (font.size as i32 / 2),
            height: font.size as i32,
        })
    }

    fn copy_texture(&mut self, renderer: RendererId, texture: TextureId, dest: Rect) {
        self.calls.push(Call::CopyTexture(renderer, texture, dest));
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if !self.live_textures.remove(&texture) {
            log::warn!("Texture {:?} released twice", texture);
        }
        self.calls.push(Call::DestroyTexture(texture));
    }

    fn delay(&mut self, duration: Duration) {
        self.calls.push(Call::Delay(duration));
    }
}
