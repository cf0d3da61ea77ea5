//! Draw commands produced by screen objects each frame.

use crate::backend::{Rect, TextureId};
use crate::style::Style;

/// Shape tag selecting a rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle = 0,
    Ellipse = 1,
    Text = 2,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Text => "text",
        }
    }
}

/// One unit of drawing work.
///
/// Geometry meaning depends on the shape: rectangles and text use
/// (x, y, w, h) with x, y at the upper-left corner; ellipses use
/// (center x, center y, w, h).
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Style snapshot taken when the command was built.
    pub style: Style,
    pub shape: ShapeKind,
    pub geometry: Rect,
    pub texture: Option<TextureId>,
}

impl DrawCommand {
    pub fn new(shape: ShapeKind, style: &Style, geometry: Rect) -> Self {
        Self {
            style: style.clone(),
            shape,
            geometry,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }
}

/// Ordered draw commands for one object.
pub type Pipeline = Vec<DrawCommand>;
