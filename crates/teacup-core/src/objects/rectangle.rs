//! Rectangle object.

use super::{ScreenObject, truncate};
use crate::backend::{Rect, WindowId};
use crate::error::EngineResult;
use crate::pipeline::{DrawCommand, Pipeline, ShapeKind};
use crate::raster::RenderTarget;
use crate::style::{Style, StyleOverrides};

/// An axis-aligned filled rectangle. `x`, `y` is the upper-left corner.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    style: Style,
    parent: Option<WindowId>,
    geometry: Rect,
}

impl Rectangle {
    /// Create a detached rectangle with the template style.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut rect = Self {
            x,
            y,
            width,
            height,
            style: Style::default(),
            parent: None,
            geometry: Rect::default(),
        };
        rect.bake_geometry();
        rect
    }

    /// Builder form of [`ScreenObject::set_style`].
    pub fn with_style(mut self, overrides: &StyleOverrides) -> Self {
        self.set_style(overrides);
        self
    }

    fn bake_geometry(&mut self) {
        self.geometry = Rect::new(
            truncate(self.x),
            truncate(self.y),
            truncate(self.width),
            truncate(self.height),
        );
    }
}

impl ScreenObject for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    fn set_style(&mut self, overrides: &StyleOverrides) {
        self.style.apply(overrides);
        self.bake_geometry();
    }

    fn parent(&self) -> Option<WindowId> {
        self.parent
    }

    fn geometry(&self) -> Rect {
        self.geometry
    }

    fn attach(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<()> {
        self.parent = Some(target.window);
        Ok(())
    }

    fn bake(&mut self, _target: &mut RenderTarget<'_>) -> EngineResult<()> {
        self.bake_geometry();
        Ok(())
    }

    fn pipeline(&self) -> Pipeline {
        vec![DrawCommand::new(ShapeKind::Rectangle, &self.style, self.geometry)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Backend, HeadlessBackend};
    use crate::font::FontRegistry;
    use crate::style::Color;

    #[test]
    fn test_geometry_truncates() {
        let rect = Rectangle::new(50.9, -1.5, 150.2, 99.99);
        assert_eq!(rect.geometry(), Rect::new(50, -1, 150, 99));
    }

    #[test]
    fn test_unattached_render_is_noop() {
        let mut backend = HeadlessBackend::new();
        let fonts = FontRegistry::default();
        let (window, renderer) = backend.create_window("t", (10, 10)).unwrap();
        backend.take_calls();

        let mut rect = Rectangle::new(0.0, 0.0, 5.0, 5.0);
        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        assert!(!rect.render(&mut target).unwrap());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_render_rebakes_moved_rect() {
        let mut backend = HeadlessBackend::new();
        let fonts = FontRegistry::default();
        let (window, renderer) = backend.create_window("t", (10, 10)).unwrap();

        let mut rect = Rectangle::new(0.0, 0.0, 5.0, 5.0)
            .with_style(&StyleOverrides::new().background_color(Color::WHITE));
        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        rect.attach(&mut target).unwrap();
        assert_eq!(rect.parent(), Some(window));

        rect.x = 3.7;
        assert!(rect.render(&mut target).unwrap());
        assert_eq!(rect.geometry(), Rect::new(3, 0, 5, 5));
        assert_eq!(
            backend.filled_rects(renderer),
            vec![(Color::WHITE, Rect::new(3, 0, 5, 5))]
        );
    }

    #[test]
    fn test_set_style_resets_to_template() {
        let mut rect = Rectangle::new(0.0, 0.0, 1.0, 1.0)
            .with_style(&StyleOverrides::new().background_color(Color::WHITE).font_size(9));
        rect.set_style(&StyleOverrides::new().color(Color::WHITE));

        assert_eq!(rect.style().background_color, Color::TRANSPARENT);
        assert_eq!(rect.style().font_size, 24);
        assert_eq!(rect.style().color, Color::WHITE);
    }

    #[test]
    fn test_pipeline_snapshots_style() {
        let mut rect = Rectangle::new(1.0, 2.0, 3.0, 4.0);
        let pipeline = rect.pipeline();
        rect.style_mut().background_color = Color::WHITE;

        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline[0].shape, ShapeKind::Rectangle);
        assert_eq!(pipeline[0].style.background_color, Color::TRANSPARENT);
        assert_eq!(pipeline[0].texture, None);
    }
}
