use tracing::debug;

use super::{Painter, Surface};
use crate::common::{is_finder_region, ColorPair, ModuleMatrix, Pattern, Shape, ShapeSink};

/// Disc radius of `Pattern::Circle`, relative to the module size.
pub const CIRCLE_RADIUS: f64 = 0.4;
/// Disc radius of `Pattern::Dots`.
pub const DOT_RADIUS: f64 = 0.3;
/// Per-side inset of `Pattern::Rounded`.
pub const ROUNDED_INSET: f64 = 0.1;
/// Corner radius of `Pattern::Rounded`.
pub const ROUNDED_RADIUS: f64 = 0.2;

impl Pattern {
    /// Shape covering one module whose cell starts at `(x, y)`.
    pub fn module_shape(&self, x: f64, y: f64, sz: f64) -> Shape {
        let (cx, cy) = (x + sz / 2.0, y + sz / 2.0);
        match self {
            Self::Square => Shape::rect(x, y, sz, sz),
            Self::Circle => Shape::disc(cx, cy, sz * CIRCLE_RADIUS),
            Self::Dots => Shape::disc(cx, cy, sz * DOT_RADIUS),
            Self::Rounded => {
                let inset = sz * ROUNDED_INSET;
                let inner = sz - 2.0 * inset;
                Shape::round_rect(x + inset, y + inset, inner, inner, sz * ROUNDED_RADIUS)
            }
        }
    }
}

/// Emits every dark module outside the finder blocks.
pub fn draw_modules(sink: &mut impl ShapeSink, matrix: &ModuleMatrix, pattern: Pattern, module_sz: f64) {
    let w = matrix.width();
    for (r, c) in matrix.dark_modules().filter(|&(r, c)| !is_finder_region(r, c, w)) {
        sink.fill(&pattern.module_shape(c as f64 * module_sz, r as f64 * module_sz, module_sz));
    }
}

/// Fills the background, then paints the data modules. A surface without a
/// drawing context is left untouched.
pub fn render_modules(surface: &mut Surface, matrix: &ModuleMatrix, pattern: Pattern, colors: &ColorPair) {
    let module_sz = matrix.module_size(surface.size());
    let Some(canvas) = surface.context() else {
        debug!("Surface has no drawing context, skipping module render");
        return;
    };

    debug!("Filling background with {}...", colors.background);
    if let Some(bg) = colors.background.to_pixel() {
        Painter::new(canvas, bg).fill_all();
    }

    debug!("Drawing {pattern} modules of {module_sz:.2}px...");
    if let Some(fg) = colors.foreground.to_pixel() {
        draw_modules(&mut Painter::new(canvas, fg), matrix, pattern, module_sz);
    }

    surface.mark_rendered();
}


#[cfg(test)]
mod module_render_tests {
    use image::Rgba;
    use test_case::test_case;

    use crate::common::{is_finder_region, Color, ColorPair, ModuleMatrix, Pattern};
    use crate::render::{render_modules, Surface};

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn full_matrix(w: usize) -> ModuleMatrix {
        ModuleMatrix::from_flat(w, vec![true; w * w]).unwrap()
    }

    #[test_case(Pattern::Square)]
    #[test_case(Pattern::Circle)]
    #[test_case(Pattern::Rounded)]
    #[test_case(Pattern::Dots)]
    fn test_finder_blocks_untouched(pattern: Pattern) {
        let matrix = full_matrix(21);
        let mut surface = Surface::new(210);
        render_modules(&mut surface, &matrix, pattern, &ColorPair::default());
        assert!(surface.is_rendered());

        let img = surface.image().unwrap();
        for (x, y, px) in img.enumerate_pixels() {
            let (r, c) = (y as usize / 10, x as usize / 10);
            if is_finder_region(r, c, 21) {
                assert_eq!(*px, WHITE, "pixel {x} {y} painted inside finder block");
            }
        }
        // Cell center of a data module is always painted
        assert_eq!(*img.get_pixel(105, 105), BLACK);
    }

    #[test]
    fn test_square_fills_whole_cell() {
        let matrix = full_matrix(21);
        let mut surface = Surface::new(210);
        render_modules(&mut surface, &matrix, Pattern::Square, &ColorPair::default());
        let img = surface.image().unwrap();
        for y in 100..110 {
            for x in 100..110 {
                assert_eq!(*img.get_pixel(x, y), BLACK);
            }
        }
    }

    #[test]
    fn test_transparent_background_kept() {
        let mut rows = vec![vec![false; 21]; 21];
        rows[10][10] = true;
        let matrix = ModuleMatrix::from_rows(rows).unwrap();
        let colors = ColorPair::new(Color::BLACK, Color::Transparent);
        let mut surface = Surface::new(210);
        render_modules(&mut surface, &matrix, Pattern::Dots, &colors);

        let img = surface.image().unwrap();
        assert_eq!(*img.get_pixel(105, 105), BLACK);
        assert_eq!(img.pixels().filter(|p| p[3] != 0).count(), img.pixels().filter(|p| **p == BLACK).count());
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(100, 100)[3], 0);
    }

    #[test]
    fn test_detached_surface_noop() {
        let mut surface = Surface::detached(210);
        render_modules(&mut surface, &full_matrix(21), Pattern::Square, &ColorPair::default());
        assert!(!surface.is_rendered());
        assert!(surface.image().is_none());
    }
}
