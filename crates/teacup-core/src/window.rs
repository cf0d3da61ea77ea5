//! Window: a renderer plus the scene objects drawn into it.

use crate::backend::{Backend, RendererId, WindowId};
use crate::error::EngineResult;
use crate::font::FontRegistry;
use crate::objects::{SceneObject, ScreenObject};
use crate::raster::RenderTarget;
use crate::style::{Style, StyleOverrides};

/// An open window owning its renderer and its attached objects.
///
/// Objects are drawn in attachment order every frame, on top of the
/// window's `background-color`.
#[derive(Debug)]
pub struct Window {
    id: WindowId,
    /// `None` once the renderer has been handed back to the backend.
    renderer: Option<RendererId>,
    title: String,
    size: (u32, u32),
    style: Style,
    children: Vec<SceneObject>,
    open: bool,
    age: u64,
}

impl Window {
    /// Create the backend window and renderer.
    ///
    /// The window is not registered; hand it to a
    /// [`Registry`](crate::registry::Registry) for the frame loop to see it.
    pub fn open(
        backend: &mut dyn Backend,
        title: &str,
        size: (u32, u32),
        style: Style,
    ) -> EngineResult<Self> {
        let (id, renderer) = backend.create_window(title, size)?;
        log::info!("Opened window {} '{}' ({}x{})", id, title, size.0, size.1);
        Ok(Self {
            id,
            renderer: Some(renderer),
            title: title.to_string(),
            size,
            style,
            children: Vec::new(),
            open: true,
            age: 0,
        })
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn renderer(&self) -> Option<RendererId> {
        self.renderer
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of frames drawn so far.
    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Mark the window closed. The frame loop destroys it on its next step.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Replace the style wholesale, resetting unspecified keys to the template.
    pub fn set_style(&mut self, overrides: &StyleOverrides) {
        self.style.apply(overrides);
    }

    pub fn children(&self) -> &[SceneObject] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&SceneObject> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.children.get_mut(index)
    }

    /// Attach an object and return its index in the draw order.
    ///
    /// Indices are assigned append-only and never reused. If the object
    /// fails to bake (e.g. its font is unknown) it is not attached.
    pub fn attach(
        &mut self,
        backend: &mut dyn Backend,
        fonts: &FontRegistry,
        object: impl Into<SceneObject>,
    ) -> EngineResult<usize> {
        let mut object = object.into();
        if let Some(renderer) = self.renderer {
            let mut target = RenderTarget::new(self.id, renderer, backend, fonts);
            object.attach(&mut target)?;
        } else {
            log::warn!("Attaching to released window {}", self.id);
        }
        self.children.push(object);
        Ok(self.children.len() - 1)
    }

    /// Draw one frame: background, children in order, then present.
    pub fn draw(&mut self, backend: &mut dyn Backend, fonts: &FontRegistry) {
        let Some(renderer) = self.renderer else {
            return;
        };
        self.age += 1;

        backend.set_draw_color(renderer, self.style.background_color);
        backend.clear(renderer);

        let mut target = RenderTarget::new(self.id, renderer, backend, fonts);
        for (index, child) in self.children.iter_mut().enumerate() {
            if let Err(e) = child.render(&mut target) {
                log::warn!(
                    "Skipped {} #{} in window {}: {}",
                    child.kind().name(),
                    index,
                    self.id,
                    e
                );
            }
        }

        if let Err(e) = target.backend.present(renderer) {
            log::error!("Failed to present window {}: {}", self.id, e);
        }
    }

    /// Release every backend resource the window holds.
    ///
    /// Only the first call does anything; it returns `false` afterwards.
    pub fn destroy(&mut self, backend: &mut dyn Backend) -> bool {
        let Some(renderer) = self.renderer.take() else {
            return false;
        };
        self.open = false;
        for child in &mut self.children {
            child.release(backend);
        }
        backend.destroy_renderer(renderer);
        backend.destroy_window(self.id);
        log::info!("Destroyed window {} '{}'", self.id, self.title);
        true
    }
}
