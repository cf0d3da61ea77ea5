//! Scene objects drawn inside a window.

mod ellipse;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use rectangle::Rectangle;
pub use text::Text;

use crate::backend::{Backend, Rect, WindowId};
use crate::error::EngineResult;
use crate::pipeline::{Pipeline, ShapeKind};
use crate::raster::RenderTarget;
use crate::style::{Style, StyleOverrides};

/// Common behaviour of everything a window can draw.
///
/// An object is created detached. Attaching it to a window records the
/// window as its parent; only then can it render. Rendering re-bakes derived
/// state from the live fields, builds a pipeline and executes it on the
/// parent's renderer.
pub trait ScreenObject {
    fn kind(&self) -> ShapeKind;

    fn style(&self) -> &Style;

    /// Mutate single keys in place. Other keys are left untouched.
    fn style_mut(&mut self) -> &mut Style;

    /// Replace the style wholesale, resetting unspecified keys to the template.
    fn set_style(&mut self, overrides: &StyleOverrides);

    /// Window this object is attached to.
    fn parent(&self) -> Option<WindowId>;

    /// Geometry as of the last bake.
    fn geometry(&self) -> Rect;

    /// Record `target.window` as parent and bake everything derived from it.
    fn attach(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<()>;

    /// Recompute derived geometry and resources from the live fields.
    fn bake(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<()>;

    /// Draw commands for the current baked state.
    fn pipeline(&self) -> Pipeline;

    /// Give back any backend resources the object holds.
    fn release(&mut self, _backend: &mut dyn Backend) {}

    /// Bake and draw. Returns `false` without touching the backend when the
    /// object is not attached.
    fn render(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<bool> {
        if self.parent().is_none() {
            return Ok(false);
        }
        self.bake(target)?;
        for command in self.pipeline() {
            target.execute(&command);
        }
        Ok(true)
    }
}

/// Any of the built-in scene objects.
#[derive(Debug)]
pub enum SceneObject {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Text(Text),
}

impl SceneObject {
    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            SceneObject::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_rectangle_mut(&mut self) -> Option<&mut Rectangle> {
        match self {
            SceneObject::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_ellipse(&self) -> Option<&Ellipse> {
        match self {
            SceneObject::Ellipse(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_ellipse_mut(&mut self) -> Option<&mut Ellipse> {
        match self {
            SceneObject::Ellipse(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            SceneObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            SceneObject::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl ScreenObject for SceneObject {
    fn kind(&self) -> ShapeKind {
        match self {
            SceneObject::Rectangle(s) => s.kind(),
            SceneObject::Ellipse(s) => s.kind(),
            SceneObject::Text(s) => s.kind(),
        }
    }

    fn style(&self) -> &Style {
        match self {
            SceneObject::Rectangle(s) => s.style(),
            SceneObject::Ellipse(s) => s.style(),
            SceneObject::Text(s) => s.style(),
        }
    }

    fn style_mut(&mut self) -> &mut Style {
        match self {
            SceneObject::Rectangle(s) => s.style_mut(),
            SceneObject::Ellipse(s) => s.style_mut(),
            SceneObject::Text(s) => s.style_mut(),
        }
    }

    fn set_style(&mut self, overrides: &StyleOverrides) {
        match self {
            SceneObject::Rectangle(s) => s.set_style(overrides),
            SceneObject::Ellipse(s) => s.set_style(overrides),
            SceneObject::Text(s) => s.set_style(overrides),
        }
    }

    fn parent(&self) -> Option<WindowId> {
        match self {
            SceneObject::Rectangle(s) => s.parent(),
            SceneObject::Ellipse(s) => s.parent(),
            SceneObject::Text(s) => s.parent(),
        }
    }

    fn geometry(&self) -> Rect {
        match self {
            SceneObject::Rectangle(s) => s.geometry(),
            SceneObject::Ellipse(s) => s.geometry(),
            SceneObject::Text(s) => s.geometry(),
        }
    }

    fn attach(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<()> {
        match self {
            SceneObject::Rectangle(s) => s.attach(target),
            SceneObject::Ellipse(s) => s.attach(target),
            SceneObject::Text(s) => s.attach(target),
        }
    }

    fn bake(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<()> {
        match self {
            SceneObject::Rectangle(s) => s.bake(target),
            SceneObject::Ellipse(s) => s.bake(target),
            SceneObject::Text(s) => s.bake(target),
        }
    }

    fn pipeline(&self) -> Pipeline {
        match self {
            SceneObject::Rectangle(s) => s.pipeline(),
            SceneObject::Ellipse(s) => s.pipeline(),
            SceneObject::Text(s) => s.pipeline(),
        }
    }

    fn release(&mut self, backend: &mut dyn Backend) {
        match self {
            SceneObject::Rectangle(s) => s.release(backend),
            SceneObject::Ellipse(s) => s.release(backend),
            SceneObject::Text(s) => s.release(backend),
        }
    }

    fn render(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<bool> {
        match self {
            SceneObject::Rectangle(s) => s.render(target),
            SceneObject::Ellipse(s) => s.render(target),
            SceneObject::Text(s) => s.render(target),
        }
    }
}

impl From<Rectangle> for SceneObject {
    fn from(rect: Rectangle) -> Self {
        SceneObject::Rectangle(rect)
    }
}

impl From<Ellipse> for SceneObject {
    fn from(ellipse: Ellipse) -> Self {
        SceneObject::Ellipse(ellipse)
    }
}

impl From<Text> for SceneObject {
    fn from(text: Text) -> Self {
        SceneObject::Text(text)
    }
}

/// Truncate toward zero the way pixel geometry is baked.
pub(crate) fn truncate(value: f64) -> i32 {
    value as i32
}
