use tracing::debug;

use super::{Painter, Surface};
use crate::common::{
    Color, CornerStyle, FinderRegion, ModuleMatrix, QRError, QRResult, Shape, ShapeSink, FINDER_SIZE,
    MIN_MODULE_COUNT,
};

/// Ring thickness relative to the pattern size.
pub const RING_THICKNESS: f64 = 0.14;
/// Outer corner radius of a rounded ring; the inner edge uses half of it.
pub const RING_RADIUS: f64 = 0.1;
/// Inner dot edge relative to the pattern size.
pub const DOT_SIZE: f64 = 0.43;
/// Per-side inset of a rounded dot, relative to the dot size.
pub const DOT_INSET: f64 = 0.1;
/// Corner radius of a rounded dot, relative to the dot size.
pub const DOT_RADIUS: f64 = 0.15;

impl CornerStyle {
    pub fn draw_ring(&self, sink: &mut impl ShapeSink, x: f64, y: f64, sz: f64) {
        let t = sz * RING_THICKNESS;
        let (outer, inner) = match self {
            Self::Square => (Shape::rect(x, y, sz, sz), Shape::rect(x + t, y + t, sz - 2.0 * t, sz - 2.0 * t)),
            Self::Circle => {
                let (cx, cy, r) = (x + sz / 2.0, y + sz / 2.0, sz / 2.0);
                (Shape::disc(cx, cy, r), Shape::disc(cx, cy, r - t))
            }
            Self::Rounded => {
                let r = sz * RING_RADIUS;
                (
                    Shape::round_rect(x, y, sz, sz, r),
                    Shape::round_rect(x + t, y + t, sz - 2.0 * t, sz - 2.0 * t, r * 0.5),
                )
            }
        };
        sink.fill_frame(&outer, &inner);
    }

    /// Draws the dot centered in the pattern starting at `(x, y)`.
    pub fn draw_dot(&self, sink: &mut impl ShapeSink, x: f64, y: f64, sz: f64) {
        let d = sz * DOT_SIZE;
        let (dx, dy) = (x + (sz - d) / 2.0, y + (sz - d) / 2.0);
        let dot = match self {
            Self::Square => Shape::rect(dx, dy, d, d),
            Self::Circle => Shape::disc(dx + d / 2.0, dy + d / 2.0, d / 2.0),
            Self::Rounded => {
                let inset = d * DOT_INSET;
                Shape::round_rect(dx + inset, dy + inset, d - 2.0 * inset, d - 2.0 * inset, d * DOT_RADIUS)
            }
        };
        sink.fill(&dot);
    }
}

/// Pixel origin of each finder pattern, in `FinderRegion::ALL` order.
pub fn finder_origins(module_sz: f64, module_count: usize) -> QRResult<[(f64, f64); 3]> {
    check_module_count(module_count)?;
    Ok(origins(module_sz, module_count))
}

fn origins(module_sz: f64, module_count: usize) -> [(f64, f64); 3] {
    FinderRegion::ALL.map(|f| {
        let (r, c) = f.origin(module_count);
        (c as f64 * module_sz, r as f64 * module_sz)
    })
}

fn check_module_count(module_count: usize) -> QRResult<()> {
    if module_count < MIN_MODULE_COUNT {
        return Err(QRError::MatrixTooSmall(module_count));
    }
    Ok(())
}

fn draw_at(sink: &mut impl ShapeSink, module_sz: f64, module_count: usize, style: CornerStyle) {
    let sz = module_sz * FINDER_SIZE as f64;
    for (x, y) in origins(module_sz, module_count) {
        style.draw_ring(sink, x, y, sz);
        style.draw_dot(sink, x, y, sz);
    }
}

pub fn draw_finder_patterns(sink: &mut impl ShapeSink, matrix: &ModuleMatrix, module_sz: f64, style: CornerStyle) {
    draw_at(sink, module_sz, matrix.width(), style);
}

/// Paints the three finder patterns over whatever the module pass left behind.
/// Module counts below a version 1 symbol are rejected with `MatrixTooSmall`.
pub fn render_finder_patterns(
    surface: &mut Surface,
    module_sz: f64,
    module_count: usize,
    style: CornerStyle,
    color: Color,
) -> QRResult<()> {
    check_module_count(module_count)?;
    paint_finder_patterns(surface, module_sz, module_count, style, color);
    Ok(())
}

pub(crate) fn paint_finder_patterns(
    surface: &mut Surface,
    module_sz: f64,
    module_count: usize,
    style: CornerStyle,
    color: Color,
) {
    let (Some(canvas), Some(fg)) = (surface.context(), color.to_pixel()) else {
        return;
    };
    debug!("Drawing {style} finder patterns...");
    draw_at(&mut Painter::new(canvas, fg), module_sz, module_count, style);
}
