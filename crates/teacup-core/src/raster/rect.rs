//! Filled rectangle.

use crate::backend::{Backend, RendererId};
use crate::pipeline::DrawCommand;

/// Fill the command's geometry with its `background-color`.
pub fn draw(command: &DrawCommand, backend: &mut dyn Backend, renderer: RendererId) {
    backend.set_draw_color(renderer, command.style.background_color);
    backend.fill_rect(renderer, command.geometry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HeadlessBackend, Rect};
    use crate::pipeline::ShapeKind;
    use crate::style::{Color, Style, StyleOverrides};

    #[test]
    fn test_fill_uses_background_color() {
        let mut backend = HeadlessBackend::new();
        let (_, renderer) = backend.create_window("t", (100, 100)).unwrap();
        let style = Style::from_overrides(
            &StyleOverrides::new()
                .color(Color::WHITE)
                .background_color((1, 2, 3, 4)),
        );

        draw(
            &DrawCommand::new(ShapeKind::Rectangle, &style, Rect::new(5, 6, 7, 8)),
            &mut backend,
            renderer,
        );

        assert_eq!(
            backend.filled_rects(renderer),
            vec![(Color::new(1, 2, 3, 4), Rect::new(5, 6, 7, 8))]
        );
    }
}
