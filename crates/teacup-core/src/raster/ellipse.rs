//! Filled ellipse via the integer midpoint algorithm.
//!
//! The ellipse is filled with horizontal spans taken from the algorithm's
//! boundary x at each scanned y, mirrored across the horizontal center line.
//! All decision terms are kept multiplied by 4 so the arithmetic stays in
//! integers. They grow with the fourth power of the semi-axes, hence `i128`.

use crate::backend::{Backend, RendererId};
use crate::pipeline::DrawCommand;

/// A horizontal run of pixels, `x0..=x1` on row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub y: i32,
    pub x0: i32,
    pub x1: i32,
}

impl Span {
    fn centered(cx: i32, y: i32, half: i128) -> Self {
        let half = half as i32;
        Self {
            y,
            x0: cx.saturating_sub(half),
            x1: cx.saturating_add(half),
        }
    }
}

/// Fill the ellipse described by the command's (cx, cy, w, h) geometry
/// with its `background-color`.
pub fn draw(command: &DrawCommand, backend: &mut dyn Backend, renderer: RendererId) {
    backend.set_draw_color(renderer, command.style.background_color);
    let g = command.geometry;
    for_each_span(g.x, g.y, g.w, g.h, |span| {
        backend.draw_line(renderer, span.x0, span.y, span.x1, span.y);
    });
}

/// Every span of the filled ellipse, in emission order.
pub fn spans(cx: i32, cy: i32, width: i32, height: i32) -> Vec<Span> {
    let mut out = Vec::new();
    for_each_span(cx, cy, width, height, |span| out.push(span));
    out
}

/// Emit the spans of a filled ellipse centered on (cx, cy).
///
/// Nothing is emitted for a non-positive width or height. When either
/// semi-axis truncates to zero a single span through the center is emitted.
pub fn for_each_span(cx: i32, cy: i32, width: i32, height: i32, mut emit: impl FnMut(Span)) {
    if width <= 0 || height <= 0 {
        return;
    }

    let rx = i128::from(width / 2);
    let ry = i128::from(height / 2);
    if rx <= 0 || ry <= 0 {
        emit(Span::centered(cx, cy, rx));
        return;
    }

    let mut pair = |x: i128, y: i128| {
        let y = y as i32;
        emit(Span::centered(cx, cy.saturating_add(y), x));
        if y != 0 {
            emit(Span::centered(cx, cy.saturating_sub(y), x));
        }
    };

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let two_rx2 = rx2 << 1;
    let two_ry2 = ry2 << 1;

    let mut x: i128 = 0;
    let mut y: i128 = ry;

    // Region 1: slope shallower than -1, step x every iteration.
    let mut p1 = (ry2 << 2) - ((rx2 * ry) << 2) + rx2;
    let mut dx: i128 = 0;
    let mut dy: i128 = two_rx2 * y;

    while dx < dy {
        pair(x, y);

        x += 1;
        dx += two_ry2;

        if p1 < 0 {
            p1 += (dx << 2) + (ry2 << 2);
        } else {
            y -= 1;
            dy -= two_rx2;
            p1 += ((dx - dy) << 2) + (ry2 << 2);
        }
    }

    // Region 2: slope steeper than -1, step y every iteration down to 0.
    let x2p1 = (x << 1) + 1;
    let ym1 = y - 1;
    let mut p2 = ry2 * x2p1 * x2p1 + rx2 * ((ym1 << 1) * (ym1 << 1)) - ((rx2 * ry2) << 2);

    while y >= 0 {
        pair(x, y);

        y -= 1;
        dy -= two_rx2;

        if p2 > 0 {
            p2 += (rx2 << 2) - (dy << 2);
        } else {
            x += 1;
            dx += two_ry2;
            p2 += ((dx - dy) << 2) + (rx2 << 2);
        }
    }
}
