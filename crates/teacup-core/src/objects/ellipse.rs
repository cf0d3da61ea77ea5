//! Ellipse object.

use super::{ScreenObject, truncate};
use crate::backend::{Rect, WindowId};
use crate::error::EngineResult;
use crate::pipeline::{DrawCommand, Pipeline, ShapeKind};
use crate::raster::RenderTarget;
use crate::style::{Style, StyleOverrides};

/// A filled ellipse inscribed in the box at `x`, `y` (upper-left corner)
/// of size `width` x `height`.
#[derive(Debug, Clone)]
pub struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    style: Style,
    parent: Option<WindowId>,
    geometry: Rect,
}

impl Ellipse {
    /// Create a detached ellipse with the template style.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut ellipse = Self {
            x,
            y,
            width,
            height,
            style: Style::default(),
            parent: None,
            geometry: Rect::default(),
        };
        ellipse.bake_geometry();
        ellipse
    }

    /// A circle of radius `radius` centered on (`cx`, `cy`).
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0)
    }

    pub fn with_style(mut self, overrides: &StyleOverrides) -> Self {
        self.set_style(overrides);
        self
    }

    /// Baked geometry is (center x, center y, width, height).
    fn bake_geometry(&mut self) {
        self.geometry = Rect::new(
            truncate(self.x + self.width / 2.0),
            truncate(self.y + self.height / 2.0),
            truncate(self.width),
            truncate(self.height),
        );
    }
}

impl ScreenObject for Ellipse {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
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
        vec![DrawCommand::new(ShapeKind::Ellipse, &self.style, self.geometry)]
    }
}
