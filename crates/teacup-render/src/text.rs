//! Glyph rasterization with `ab_glyph`.

use crate::canvas::Canvas;
use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use teacup_core::{BackendError, BackendResult, Color, FontFace};

/// Parsed font files, keyed by path. Sizes share one parsed face.
#[derive(Default)]
pub struct FontCache {
    faces: HashMap<PathBuf, FontVec>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of font files parsed so far.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Rasterize `text` on a single line, tinted with `color`.
    ///
    /// The canvas is as wide as the summed advances and as tall as the
    /// face's ascent minus descent at `face.size` pixels.
    pub fn render(&mut self, face: &FontFace, color: Color, text: &str) -> BackendResult<Canvas> {
        let font = self.load(&face.path)?;
        Ok(rasterize(font, face.size as f32, color, text))
    }

    fn load(&mut self, path: &Path) -> BackendResult<&FontVec> {
        if !self.faces.contains_key(path) {
            let bytes = std::fs::read(path)
                .map_err(|e| BackendError::Font(format!("{}: {}", path.display(), e)))?;
            let font = FontVec::try_from_vec(bytes)
                .map_err(|e| BackendError::Font(format!("{}: {}", path.display(), e)))?;
            log::debug!("Loaded font file {}", path.display());
            self.faces.insert(path.to_path_buf(), font);
        }
        self.faces
            .get(path)
            .ok_or_else(|| BackendError::Font(path.display().to_string()))
    }
}

fn rasterize<F: Font>(font: &F, size: f32, color: Color, text: &str) -> Canvas {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);

    let mut glyphs = Vec::new();
    let mut caret = 0.0f32;
    let mut previous: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(previous) = previous {
            caret += scaled.kern(previous, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, scaled.ascent())));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    let width = caret.ceil().max(0.0) as u32;
    let height = (scaled.ascent() - scaled.descent()).ceil().max(0.0) as u32;
    let mut canvas = Canvas::new(width, height);

    for glyph in glyphs {
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|x, y, coverage| {
            let alpha = (f32::from(color.a) * coverage.clamp(0.0, 1.0)).round() as u8;
            if alpha == 0 {
                return;
            }
            let px = bounds.min.x as i32 + x as i32;
            let py = bounds.min.y as i32 + y as i32;
            let existing = canvas.pixel(px, py).map_or(0, |c| c.a);
            canvas.put(px, py, Color::new(color.r, color.g, color.b, alpha.max(existing)));
        });
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::unpack;

    const RED: Color = Color::rgb(200, 10, 30);

    fn mono(size: u32) -> FontFace {
        FontFace {
            name: "DejaVu Sans Mono".to_string(),
            path: Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/DejaVuSansMono.ttf"),
            size,
        }
    }

    #[test]
    fn test_render_measures_advances_and_line_height() {
        let face = mono(20);
        let mut cache = FontCache::new();
        let canvas = cache.render(&face, RED, "Hi!").unwrap();

        let font = FontVec::try_from_vec(std::fs::read(&face.path).unwrap()).unwrap();
        let scaled = font.as_scaled(PxScale::from(20.0));
        let ids: Vec<GlyphId> = "Hi!".chars().map(|c| scaled.glyph_id(c)).collect();
        let mut advance = 0.0f32;
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                advance += scaled.kern(ids[i - 1], id);
            }
            advance += scaled.h_advance(id);
        }

        assert_eq!(canvas.width(), advance.ceil() as u32);
        assert_eq!(
            canvas.height(),
            (scaled.ascent() - scaled.descent()).ceil() as u32
        );
    }

    #[test]
    fn test_render_tints_coverage() {
        let mut cache = FontCache::new();
        let canvas = cache.render(&mono(24), RED, "Teacup").unwrap();

        let inked: Vec<Color> = canvas
            .pixels()
            .iter()
            .map(|&p| unpack(p))
            .filter(|c| c.a > 0)
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|c| (c.r, c.g, c.b) == (200, 10, 30)));
        assert!(inked.iter().any(|c| c.a == 255));
    }

    #[test]
    fn test_sizes_share_one_parsed_face() {
        let mut cache = FontCache::new();
        let small = cache.render(&mono(12), RED, "ab").unwrap();
        let large = cache.render(&mono(36), RED, "ab").unwrap();

        assert_eq!(cache.len(), 1);
        assert!(large.width() > small.width());
        assert!(large.height() > small.height());
    }

    #[test]
    fn test_empty_text_has_no_width() {
        let mut cache = FontCache::new();
        let canvas = cache.render(&mono(16), RED, "").unwrap();
        assert_eq!(canvas.width(), 0);
        assert!(canvas.height() > 0);
    }

    #[test]
    fn test_missing_font_file() {
        let mut cache = FontCache::new();
        let face = FontFace {
            name: "Nope".to_string(),
            path: PathBuf::from("/definitely/not/here.ttf"),
            size: 12,
        };
        let result = cache.render(&face, Color::BLACK, "x");
        assert!(matches!(result, Err(BackendError::Font(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_garbage_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let mut cache = FontCache::new();
        let face = FontFace {
            name: "Bad".to_string(),
            path,
            size: 12,
        };
        assert!(matches!(
            cache.render(&face, Color::BLACK, "x"),
            Err(BackendError::Font(_))
        ));
    }
}
