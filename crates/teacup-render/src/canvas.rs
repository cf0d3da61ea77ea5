//! CPU pixel buffers.
//!
//! Pixels are packed `0xAARRGGBB`. Every operation clips to the canvas.

use teacup_core::{Color, Rect};

/// Pack a color into `0xAARRGGBB`.
#[inline]
pub fn pack(color: Color) -> u32 {
    (u32::from(color.a) << 24)
        | (u32::from(color.r) << 16)
        | (u32::from(color.g) << 8)
        | u32::from(color.b)
}

#[inline]
pub fn unpack(pixel: u32) -> Color {
    Color::new(
        (pixel >> 16) as u8,
        (pixel >> 8) as u8,
        pixel as u8,
        (pixel >> 24) as u8,
    )
}

/// Source-over composite of `src` onto `dst`, both `0xAARRGGBB`.
#[inline]
fn blend_over(src: u32, dst: u32) -> u32 {
    let sa = src >> 24;
    if sa == 0xFF {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = dst >> 24;
    let inv_sa = 255 - sa;
    let out_a = sa + da * inv_sa / 255;
    if out_a == 0 {
        return 0;
    }

    let channel = |shift: u32| {
        let s = (src >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        ((s * sa + d * da * inv_sa / 255) / out_a).min(255)
    };

    (out_a << 24) | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// A width x height block of pixels: a window frame or a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| unpack(self.pixels[i]))
    }

    /// Overwrite one pixel, no blending.
    pub fn put(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = pack(color);
        }
    }

    /// Overwrite every pixel.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(pack(color));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        let src = pack(color);
        let stride = self.width as usize;
        for y in clipped.y..clipped.bottom() {
            let start = y as usize * stride + clipped.x as usize;
            let end = start + clipped.w as usize;
            for pixel in &mut self.pixels[start..end] {
                *pixel = blend_over(src, *pixel);
            }
        }
    }

    /// Line with both end points included.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if y0 == y1 {
            let (left, right) = (x0.min(x1), x0.max(x1));
            self.fill_rect(Rect::new(left, y0, right - left + 1, 1), color);
            return;
        }

        let src = pack(color);
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend(x, y, src);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Scale `src` into `dest` (nearest neighbour) and composite it.
    pub fn blit_scaled(&mut self, src: &Canvas, dest: Rect) {
        if dest.is_empty() || src.width == 0 || src.height == 0 {
            return;
        }
        let Some(clipped) = dest.intersection(&self.bounds()) else {
            return;
        };

        let stride = self.width as usize;
        for y in clipped.y..clipped.bottom() {
            let sy = ((y - dest.y) as i64 * src.height as i64 / dest.h as i64) as usize;
            let src_row = sy * src.width as usize;
            for x in clipped.x..clipped.right() {
                let sx = ((x - dest.x) as i64 * src.width as i64 / dest.w as i64) as usize;
                let i = y as usize * stride + x as usize;
                self.pixels[i] = blend_over(src.pixels[src_row + sx], self.pixels[i]);
            }
        }
    }

    /// Replace the contents with `other`, reallocating only on size change.
    pub fn copy_from(&mut self, other: &Canvas) {
        self.width = other.width;
        self.height = other.height;
        self.pixels.clone_from(&other.pixels);
    }

    /// Row-major RGBA8 bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&pixel| unpack(pixel).to_array())
            .collect()
    }

    fn blend(&mut self, x: i32, y: i32, src: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = blend_over(src, self.pixels[i]);
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_pack_unpack() {
        let color = Color::new(1, 2, 3, 4);
        assert_eq!(pack(color), 0x04010203);
        assert_eq!(unpack(pack(color)), color);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Rect::new(-2, 2, 4, 10), RED);

        assert_eq!(canvas.pixel(0, 2), Some(RED));
        assert_eq!(canvas.pixel(1, 3), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(Color::TRANSPARENT));
        assert_eq!(canvas.pixel(0, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_blend_half_alpha_over_opaque() {
        let mut canvas = Canvas::new(1, 1);
        canvas.clear(Color::rgb(0, 0, 255));
        canvas.fill_rect(Rect::new(0, 0, 1, 1), Color::new(255, 0, 0, 128));

        let pixel = canvas.pixel(0, 0).unwrap();
        assert_eq!(pixel.a, 255);
        assert_eq!(pixel.r, 128);
        assert_eq!(pixel.b, 127);
    }

    #[test]
    fn test_transparent_fill_is_noop() {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(Color::WHITE);
        canvas.fill_rect(canvas.bounds(), Color::TRANSPARENT);
        assert!(canvas.pixels().iter().all(|&p| p == pack(Color::WHITE)));
    }

    #[test]
    fn test_horizontal_line_inclusive() {
        let mut canvas = Canvas::new(10, 3);
        canvas.draw_line(7, 1, 2, 1, RED);

        let lit: Vec<i32> = (0..10).filter(|&x| canvas.pixel(x, 1) == Some(RED)).collect();
        assert_eq!(lit, vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_diagonal_line() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_line(0, 0, 3, 3, RED);
        for i in 0..4 {
            assert_eq!(canvas.pixel(i, i), Some(RED));
        }
        assert_eq!(canvas.pixel(1, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_blit_scaled_nearest() {
        let mut src = Canvas::new(2, 1);
        src.put(0, 0, RED);
        src.put(1, 0, Color::WHITE);

        let mut dst = Canvas::new(4, 2);
        dst.blit_scaled(&src, Rect::new(0, 0, 4, 2));

        assert_eq!(dst.pixel(1, 1), Some(RED));
        assert_eq!(dst.pixel(2, 0), Some(Color::WHITE));
        assert_eq!(dst.pixel(3, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_to_rgba_layout() {
        let mut canvas = Canvas::new(2, 1);
        canvas.put(1, 0, Color::new(9, 8, 7, 6));
        assert_eq!(canvas.to_rgba(), vec![0, 0, 0, 0, 9, 8, 7, 6]);
    }
}
