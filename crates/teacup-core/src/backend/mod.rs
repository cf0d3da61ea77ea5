//! Graphics backend abstraction.
//!
//! The engine never touches a native API directly. Everything it needs from a
//! platform (windows, renderers, primitive drawing, text rasterization and an
//! event queue) goes through the [`Backend`] trait.

mod headless;

pub use headless::{Call, HeadlessBackend};

use crate::font::FontFace;
use crate::style::Color;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Backend errors.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Window creation failed: {0}")]
    WindowCreation(String),
    #[error("Unknown renderer: {0:?}")]
    UnknownRenderer(RendererId),
    #[error("Unknown texture: {0:?}")]
    UnknownTexture(TextureId),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Text rendering failed: {0}")]
    Text(String),
    #[error("Present failed: {0}")]
    Present(String),
    #[error("Backend error: {0}")]
    Other(String),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend-assigned window identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a renderer context, owned by exactly one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RendererId(pub u32);

/// Handle to a texture living inside the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Integer rectangle: upper-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Overlap of two rectangles, `None` when they do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}

/// Events the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user asked to close one window.
    WindowClose(WindowId),
    /// The whole application is shutting down.
    Quit,
}

/// A texture holding rendered text, with its measured size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTexture {
    pub texture: TextureId,
    pub width: i32,
    pub height: i32,
}

/// Capabilities a native graphics backend must supply.
///
/// Drawing primitives are fire-and-forget, matching immediate-mode 2D
/// renderers: a call against a released renderer is ignored.
pub trait Backend {
    /// Open a window and its renderer.
    fn create_window(
        &mut self,
        title: &str,
        size: (u32, u32),
    ) -> BackendResult<(WindowId, RendererId)>;

    fn destroy_renderer(&mut self, renderer: RendererId);

    fn destroy_window(&mut self, window: WindowId);

    /// Next pending event, if any. Never blocks.
    fn poll_event(&mut self) -> Option<Event>;

    fn set_draw_color(&mut self, renderer: RendererId, color: Color);

    /// Fill the whole target with the current draw color.
    fn clear(&mut self, renderer: RendererId);

    fn fill_rect(&mut self, renderer: RendererId, rect: Rect);

    /// Draw a line between two inclusive end points with the current draw color.
    fn draw_line(&mut self, renderer: RendererId, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Push the finished frame to the screen.
    fn present(&mut self, renderer: RendererId) -> BackendResult<()>;

    /// Rasterize `text` into a new texture and report its size.
    fn render_text(
        &mut self,
        renderer: RendererId,
        font: &FontFace,
        color: Color,
        text: &str,
    ) -> BackendResult<TextTexture>;

    /// Copy a texture, stretched to `dest`. The current draw color is ignored.
    fn copy_texture(&mut self, renderer: RendererId, texture: TextureId, dest: Rect);

    fn destroy_texture(&mut self, texture: TextureId);

    /// Block the calling thread.
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
