//! Text object.

use super::{ScreenObject, truncate};
use crate::backend::{Backend, Rect, TextTexture, WindowId};
use crate::error::{EngineError, EngineResult};
use crate::pipeline::{DrawCommand, Pipeline, ShapeKind};
use crate::raster::RenderTarget;
use crate::style::{Color, Style, StyleOverrides};

/// Style keys the rendered texture depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TextureKey {
    color: Color,
    font_family: String,
    font_size: u32,
}

impl TextureKey {
    fn of(style: &Style) -> Self {
        Self {
            color: style.color,
            font_family: style.font_family.clone(),
            font_size: style.font_size,
        }
    }
}

/// A single line of text. Font, size and glyph color come from the style's
/// `font-family`, `font-size` and `color`; `background-color` paints a panel
/// behind the glyphs.
///
/// The glyph texture is rendered by the backend and kept until one of the
/// keys it depends on changes.
#[derive(Debug)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    text: String,
    style: Style,
    parent: Option<WindowId>,
    geometry: Rect,
    texture: Option<TextTexture>,
    baked: Option<TextureKey>,
}

impl Text {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            style: Style::default(),
            parent: None,
            geometry: Rect::new(truncate(x), truncate(y), 0, 0),
            texture: None,
            baked: None,
        }
    }

    pub fn with_style(mut self, overrides: &StyleOverrides) -> Self {
        self.set_style(overrides);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current glyph texture, if one has been baked.
    pub fn texture(&self) -> Option<TextTexture> {
        self.texture
    }

    /// Render a new texture when forced or when color, family or size moved.
    fn bake_texture(&mut self, target: &mut RenderTarget<'_>, force: bool) -> EngineResult<()> {
        let key = TextureKey::of(&self.style);
        if !force && self.baked.as_ref() == Some(&key) {
            return Ok(());
        }

        if key.font_size == 0 {
            return Err(EngineError::InvalidStyle("font-size must be positive".to_string()));
        }
        let face = target
            .fonts
            .load(&key.font_family, key.font_size)
            .ok_or_else(|| EngineError::UnknownFont(key.font_family.clone()))?;
        let texture = target
            .backend
            .render_text(target.renderer, &face, key.color, &self.text)?;
        log::debug!(
            "Baked text {:?} with {} {}px -> {}x{}",
            self.text,
            key.font_family,
            key.font_size,
            texture.width,
            texture.height
        );

        if let Some(old) = self.texture.replace(texture) {
            target.backend.destroy_texture(old.texture);
        }
        self.baked = Some(key);
        Ok(())
    }

    fn bake_geometry(&mut self) {
        let (width, height) = self
            .texture
            .map_or((0, 0), |texture| (texture.width, texture.height));
        self.geometry = Rect::new(truncate(self.x), truncate(self.y), width, height);
    }
}

impl ScreenObject for Text {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// The texture is re-rendered on the next bake if the new style changes it.
    fn set_style(&mut self, overrides: &StyleOverrides) {
        self.style.apply(overrides);
    }

    fn parent(&self) -> Option<WindowId> {
        self.parent
    }

    fn geometry(&self) -> Rect {
        self.geometry
    }

    fn attach(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<()> {
        self.bake_texture(target, true)?;
        self.bake_geometry();
        self.parent = Some(target.window);
        Ok(())
    }

    fn bake(&mut self, target: &mut RenderTarget<'_>) -> EngineResult<()> {
        self.bake_texture(target, false)?;
        self.bake_geometry();
        Ok(())
    }

    fn pipeline(&self) -> Pipeline {
        vec![
            DrawCommand::new(ShapeKind::Text, &self.style, self.geometry)
                .with_texture(self.texture.map(|texture| texture.texture)),
        ]
    }

    fn release(&mut self, backend: &mut dyn Backend) {
        if let Some(texture) = self.texture.take() {
            backend.destroy_texture(texture.texture);
        }
        self.baked = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, HeadlessBackend};
    use crate::font::FontRegistry;

    fn setup() -> (HeadlessBackend, FontRegistry, WindowId, crate::backend::RendererId) {
        let mut backend = HeadlessBackend::new();
        let (window, renderer) = backend.create_window("t", (200, 200)).unwrap();
        backend.take_calls();
        (backend, FontRegistry::default(), window, renderer)
    }

    fn render_text_calls(backend: &HeadlessBackend) -> usize {
        backend.count(|c| matches!(c, Call::RenderText { .. }))
    }

    #[test]
    fn test_attach_forces_bake() {
        let (mut backend, fonts, window, renderer) = setup();
        let mut text = Text::new(10.0, 20.0, "hello");

        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        text.attach(&mut target).unwrap();

        assert_eq!(text.parent(), Some(window));
        assert_eq!(text.geometry(), Rect::new(10, 20, 60, 24));
        assert_eq!(render_text_calls(&backend), 1);
    }

    #[test]
    fn test_texture_reused_while_style_unchanged() {
        let (mut backend, fonts, window, renderer) = setup();
        let mut text = Text::new(0.0, 0.0, "abc");

        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        text.attach(&mut target).unwrap();
        let first = text.texture().unwrap();

        text.x = 5.0;
        text.render(&mut target).unwrap();
        text.render(&mut target).unwrap();

        assert_eq!(text.texture().unwrap().texture, first.texture);
        assert_eq!(text.geometry().x, 5);
        assert_eq!(render_text_calls(&backend), 1);
    }

    #[test]
    fn test_font_size_change_rebakes() {
        let (mut backend, fonts, window, renderer) = setup();
        let mut text = Text::new(0.0, 0.0, "abcd");

        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        text.attach(&mut target).unwrap();
        let first = text.texture().unwrap();

        text.style_mut().font_size = 40;
        text.render(&mut target).unwrap();
        let second = text.texture().unwrap();

        assert_ne!(second.texture, first.texture);
        assert_eq!((second.width, second.height), (80, 40));
        assert_eq!(text.geometry(), Rect::new(0, 0, 80, 40));
        assert_eq!(render_text_calls(&backend), 2);
        assert!(backend.calls().contains(&Call::DestroyTexture(first.texture)));
        assert_eq!(backend.live_textures(), 1);
    }

    #[test]
    fn test_background_change_keeps_texture() {
        let (mut backend, fonts, window, renderer) = setup();
        let mut text = Text::new(0.0, 0.0, "abcd");

        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        text.attach(&mut target).unwrap();
        text.style_mut().background_color = Color::WHITE;
        text.render(&mut target).unwrap();

        assert_eq!(render_text_calls(&backend), 1);
    }

    #[test]
    fn test_unknown_font_fails_attach() {
        let (mut backend, fonts, window, renderer) = setup();
        let mut text =
            Text::new(0.0, 0.0, "x").with_style(&StyleOverrides::new().font_family("Nope"));

        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        let result = text.attach(&mut target);

        assert!(matches!(result, Err(EngineError::UnknownFont(name)) if name == "Nope"));
        assert_eq!(text.parent(), None);
        assert_eq!(render_text_calls(&backend), 0);
    }

    #[test]
    fn test_zero_font_size_is_not_baked() {
        let (mut backend, fonts, window, renderer) = setup();
        let mut text = Text::new(0.0, 0.0, "abc");

        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        text.attach(&mut target).unwrap();
        text.style_mut().font_size = 0;

        assert!(matches!(
            text.render(&mut target),
            Err(EngineError::InvalidStyle(_))
        ));
        assert_eq!(render_text_calls(&backend), 1);
    }

    #[test]
    fn test_pipeline_carries_texture() {
        let (mut backend, fonts, window, renderer) = setup();
        let mut text = Text::new(1.0, 2.0, "hi");

        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        text.attach(&mut target).unwrap();
        let pipeline = text.pipeline();

        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline[0].shape, ShapeKind::Text);
        assert_eq!(pipeline[0].texture, text.texture().map(|t| t.texture));
    }

    #[test]
    fn test_release_frees_texture() {
        let (mut backend, fonts, window, renderer) = setup();
        let mut text = Text::new(0.0, 0.0, "bye");

        let mut target = RenderTarget::new(window, renderer, &mut backend, &fonts);
        text.attach(&mut target).unwrap();
        text.release(&mut backend);

        assert!(text.texture().is_none());
        assert_eq!(backend.live_textures(), 0);
    }
}
