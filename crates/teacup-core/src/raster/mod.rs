//! Shape rasterizers.
//!
//! Each [`ShapeKind`] maps to a plain function that turns one
//! [`DrawCommand`] into backend primitive calls.

pub mod ellipse;
pub mod rect;
pub mod text;

pub use ellipse::Span;

use crate::backend::{Backend, RendererId, WindowId};
use crate::font::FontRegistry;
use crate::pipeline::{DrawCommand, ShapeKind};

/// Signature shared by every rasterizer.
pub type Rasterizer = fn(&DrawCommand, &mut dyn Backend, RendererId);

/// Indexed by `ShapeKind as usize`.
const RASTERIZERS: [Rasterizer; 3] = [rect::draw, ellipse::draw, text::draw];

/// Rasterizer registered for `kind`.
pub fn rasterizer(kind: ShapeKind) -> Rasterizer {
    RASTERIZERS[kind as usize]
}

/// Execute one draw command.
pub fn draw(command: &DrawCommand, backend: &mut dyn Backend, renderer: RendererId) {
    rasterizer(command.shape)(command, backend, renderer);
}

/// Everything a screen object needs to bake and render into one window.
pub struct RenderTarget<'a> {
    pub window: WindowId,
    pub renderer: RendererId,
    pub backend: &'a mut dyn Backend,
    pub fonts: &'a FontRegistry,
}

impl<'a> RenderTarget<'a> {
    pub fn new(
        window: WindowId,
        renderer: RendererId,
        backend: &'a mut dyn Backend,
        fonts: &'a FontRegistry,
    ) -> Self {
        Self {
            window,
            renderer,
            backend,
            fonts,
        }
    }

    /// Run `command` against this target's renderer.
    pub fn execute(&mut self, command: &DrawCommand) {
        draw(command, &mut *self.backend, self.renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, HeadlessBackend, Rect};
    use crate::style::Style;

    #[test]
    fn test_dispatch_by_kind() {
        let mut backend = HeadlessBackend::new();
        let (_, renderer) = backend.create_window("t", (100, 100)).unwrap();
        backend.take_calls();

        let style = Style::default();
        draw(
            &DrawCommand::new(ShapeKind::Rectangle, &style, Rect::new(1, 1, 5, 5)),
            &mut backend,
            renderer,
        );
        assert_eq!(backend.count(|c| matches!(c, Call::FillRect(..))), 1);

        draw(
            &DrawCommand::new(ShapeKind::Ellipse, &style, Rect::new(50, 50, 10, 10)),
            &mut backend,
            renderer,
        );
        assert!(backend.count(|c| matches!(c, Call::DrawLine(..))) > 0);
        assert_eq!(backend.count(|c| matches!(c, Call::FillRect(..))), 1);
    }
}
