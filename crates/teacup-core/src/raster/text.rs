//! Text: background panel plus the baked glyph texture.

use super::rect;
use crate::backend::{Backend, RendererId};
use crate::pipeline::DrawCommand;

pub fn draw(command: &DrawCommand, backend: &mut dyn Backend, renderer: RendererId) {
    rect::draw(command, backend, renderer);

    backend.set_draw_color(renderer, command.style.color);
    match command.texture {
        Some(texture) => backend.copy_texture(renderer, texture, command.geometry),
        None => log::trace!("Text command without a baked texture"),
    }
}
