//! CPU backend drawing into in-memory framebuffers.

use crate::canvas::Canvas;
use crate::text::FontCache;
use std::collections::{BTreeMap, VecDeque};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use teacup_core::{
    Backend, BackendError, BackendResult, Color, Event, FontFace, Rect, RendererId, TextTexture,
    TextureId, WindowId,
};
use thiserror::Error;

/// Errors writing a frame to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown renderer: {0:?}")]
    UnknownRenderer(RendererId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// One renderer: the frame being drawn and the last presented one.
struct Surface {
    window: WindowId,
    draw_color: Color,
    back: Canvas,
    front: Canvas,
}

/// Renders every window into RGBA framebuffers in memory.
///
/// There is no display, so events only arrive through
/// [`SoftwareBackend::push_event`].
#[derive(Default)]
pub struct SoftwareBackend {
    next_id: u32,
    windows: BTreeMap<WindowId, String>,
    surfaces: BTreeMap<RendererId, Surface>,
    textures: BTreeMap<TextureId, Canvas>,
    fonts: FontCache,
    events: VecDeque<Event>,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn window_title(&self, window: WindowId) -> Option<&str> {
        self.windows.get(&window).map(String::as_str)
    }

    /// Window a renderer draws into.
    pub fn renderer_window(&self, renderer: RendererId) -> Option<WindowId> {
        self.surfaces.get(&renderer).map(|surface| surface.window)
    }

    pub fn texture(&self, texture: TextureId) -> Option<&Canvas> {
        self.textures.get(&texture)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Last presented frame of a renderer.
    pub fn snapshot(&self, renderer: RendererId) -> Option<&Canvas> {
        self.surfaces.get(&renderer).map(|surface| &surface.front)
    }

    /// Write the last presented frame as an RGBA PNG.
    pub fn save_png(&self, renderer: RendererId, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let frame = self
            .snapshot(renderer)
            .ok_or(ExportError::UnknownRenderer(renderer))?;
        let file = BufWriter::new(File::create(path.as_ref())?);

        let mut encoder = png::Encoder::new(file, frame.width(), frame.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&frame.to_rgba())?;
        writer.finish()?;

        log::info!(
            "Saved {}x{} frame to {}",
            frame.width(),
            frame.height(),
            path.as_ref().display()
        );
        Ok(())
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn surface_mut(&mut self, renderer: RendererId) -> Option<&mut Surface> {
        let surface = self.surfaces.get_mut(&renderer);
        if surface.is_none() {
            log::trace!("Ignoring draw on released renderer {:?}", renderer);
        }
        surface
    }
}

impl Backend for SoftwareBackend {
    fn create_window(
        &mut self,
        title: &str,
        size: (u32, u32),
    ) -> BackendResult<(WindowId, RendererId)> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(BackendError::WindowCreation(format!(
                "'{}' has zero size {}x{}",
                title, width, height
            )));
        }
        let window = WindowId(self.next_id());
        let renderer = RendererId(self.next_id());
        self.windows.insert(window, title.to_string());
        self.surfaces.insert(
            renderer,
            Surface {
                window,
                draw_color: Color::BLACK,
                back: Canvas::new(width, height),
                front: Canvas::new(width, height),
            },
        );
        Ok((window, renderer))
    }

    fn destroy_renderer(&mut self, renderer: RendererId) {
        if self.surfaces.remove(&renderer).is_none() {
            log::warn!("Renderer {:?} released twice", renderer);
        }
    }

    fn destroy_window(&mut self, window: WindowId) {
        if self.windows.remove(&window).is_none() {
            log::warn!("Window {} released twice", window);
        }
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    fn set_draw_color(&mut self, renderer: RendererId, color: Color) {
        if let Some(surface) = self.surface_mut(renderer) {
            surface.draw_color = color;
        }
    }

    fn clear(&mut self, renderer: RendererId) {
        if let Some(surface) = self.surface_mut(renderer) {
            surface.back.clear(surface.draw_color);
        }
    }

    fn fill_rect(&mut self, renderer: RendererId, rect: Rect) {
        if let Some(surface) = self.surface_mut(renderer) {
            surface.back.fill_rect(rect, surface.draw_color);
        }
    }

    fn draw_line(&mut self, renderer: RendererId, x0: i32, y0: i32, x1: i32, y1: i32) {
        if let Some(surface) = self.surface_mut(renderer) {
            surface.back.draw_line(x0, y0, x1, y1, surface.draw_color);
        }
    }

    fn present(&mut self, renderer: RendererId) -> BackendResult<()> {
        let surface = self
            .surfaces
            .get_mut(&renderer)
            .ok_or(BackendError::UnknownRenderer(renderer))?;
        surface.front.copy_from(&surface.back);
        Ok(())
    }

    fn render_text(
        &mut self,
        renderer: RendererId,
        font: &FontFace,
        color: Color,
        text: &str,
    ) -> BackendResult<TextTexture> {
        if !self.surfaces.contains_key(&renderer) {
            return Err(BackendError::UnknownRenderer(renderer));
        }
        let canvas = self.fonts.render(font, color, text)?;
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);
        let texture = TextureId(self.next_id());
        self.textures.insert(texture, canvas);
        Ok(TextTexture {
            texture,
            width,
            height,
        })
    }

    fn copy_texture(&mut self, renderer: RendererId, texture: TextureId, dest: Rect) {
        let Some(source) = self.textures.get(&texture) else {
            log::warn!("Copy of unknown texture {:?}", texture);
            return;
        };
        if let Some(surface) = self.surfaces.get_mut(&renderer) {
            surface.back.blit_scaled(source, dest);
        }
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_none() {
            log::warn!("Texture {:?} released twice", texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teacup_core::{Ellipse, Engine, EngineError, Rectangle, StyleOverrides, Text};

    const BLUE: Color = Color::new(50, 120, 255, 255);

    #[test]
    fn test_zero_size_window_rejected() {
        let mut backend = SoftwareBackend::new();
        assert!(matches!(
            backend.create_window("empty", (0, 10)),
            Err(BackendError::WindowCreation(_))
        ));
    }

    #[test]
    fn test_frame_visible_only_after_present() {
        let mut backend = SoftwareBackend::new();
        let (_, renderer) = backend.create_window("w", (4, 4)).unwrap();

        backend.set_draw_color(renderer, BLUE);
        backend.clear(renderer);
        assert_eq!(backend.snapshot(renderer).unwrap().pixel(0, 0), Some(Color::TRANSPARENT));

        backend.present(renderer).unwrap();
        assert_eq!(backend.snapshot(renderer).unwrap().pixel(3, 3), Some(BLUE));
    }

    #[test]
    fn test_draw_on_released_renderer_ignored() {
        let mut backend = SoftwareBackend::new();
        let (window, renderer) = backend.create_window("w", (4, 4)).unwrap();
        backend.destroy_renderer(renderer);
        backend.destroy_window(window);

        backend.fill_rect(renderer, Rect::new(0, 0, 1, 1));
        assert!(matches!(
            backend.present(renderer),
            Err(BackendError::UnknownRenderer(_))
        ));
        assert!(backend.window_title(window).is_none());
    }

    #[test]
    fn test_engine_scene_pixels() {
        let mut engine = Engine::init(SoftwareBackend::new());
        let id = engine
            .create_window(
                "scene",
                (40, 40),
                &StyleOverrides::new().background_color((30, 30, 30, 255)),
            )
            .unwrap();
        engine
            .attach(
                id,
                Rectangle::new(5.0, 5.0, 10.0, 10.0)
                    .with_style(&StyleOverrides::new().background_color(BLUE)),
            )
            .unwrap();
        engine
            .attach(
                id,
                Ellipse::new(20.0, 20.0, 10.0, 10.0)
                    .with_style(&StyleOverrides::new().background_color(Color::WHITE)),
            )
            .unwrap();
        let renderer = engine.window(id).unwrap().renderer().unwrap();

        engine.step(0);

        let frame = engine.backend().snapshot(renderer).unwrap();
        assert_eq!(frame.pixel(0, 0), Some(Color::rgb(30, 30, 30)));
        assert_eq!(frame.pixel(10, 10), Some(BLUE));
        assert_eq!(frame.pixel(15, 15), Some(Color::rgb(30, 30, 30)));
        assert_eq!(frame.pixel(25, 25), Some(Color::WHITE));
        assert_eq!(frame.pixel(20, 20), Some(Color::rgb(30, 30, 30)));
    }

    #[test]
    fn test_missing_font_file_fails_attach() {
        let mut engine = Engine::init(SoftwareBackend::new());
        engine
            .fonts_mut()
            .register_font("Ghost", "/no/such/font.ttf");
        let id = engine
            .create_window("text", (40, 40), &StyleOverrides::new())
            .unwrap();

        let result = engine.attach(
            id,
            Text::new(0.0, 0.0, "boo").with_style(&StyleOverrides::new().font_family("Ghost")),
        );

        assert!(matches!(
            result,
            Err(EngineError::Backend(BackendError::Font(_)))
        ));
        assert!(engine.window(id).unwrap().children().is_empty());
        assert_eq!(engine.backend().texture_count(), 0);
    }

    #[test]
    fn test_save_png() {
        let mut backend = SoftwareBackend::new();
        let (_, renderer) = backend.create_window("w", (3, 2)).unwrap();
        backend.set_draw_color(renderer, BLUE);
        backend.clear(renderer);
        backend.present(renderer).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        backend.save_png(renderer, &path).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (3, 2));
    }

    #[test]
    fn test_save_png_unknown_renderer() {
        let backend = SoftwareBackend::new();
        let dir = tempfile::tempdir().unwrap();
        let result = backend.save_png(RendererId(42), dir.path().join("x.png"));
        assert!(matches!(result, Err(ExportError::UnknownRenderer(_))));
    }

    #[test]
    fn test_unknown_texture_copy_is_ignored() {
        let mut backend = SoftwareBackend::new();
        let (_, renderer) = backend.create_window("w", (2, 2)).unwrap();
        backend.copy_texture(renderer, TextureId(99), Rect::new(0, 0, 2, 2));
        backend.present(renderer).unwrap();
        assert_eq!(backend.snapshot(renderer).unwrap().pixel(0, 0), Some(Color::TRANSPARENT));
    }
}
