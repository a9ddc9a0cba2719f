use image::{Pixel, Rgba, RgbaImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use crate::common::{pixel_span, QRError, QRResult, Shape, ShapeSink};

// Surface
//------------------------------------------------------------------------------

/// Square RGBA raster a render paints into. A detached surface has no drawing
/// context; every render phase leaves it untouched and `is_rendered` stays
/// false so the caller can fall back to an unstyled render.
#[derive(Debug, Clone)]
pub struct Surface {
    size: u32,
    canvas: Option<RgbaImage>,
    rendered: bool,
}

impl Surface {
    /// Fully transparent surface. A zero size yields a detached surface.
    pub fn new(size: u32) -> Self {
        if size == 0 {
            return Self::detached(size);
        }
        Self { size, canvas: Some(RgbaImage::new(size, size)), rendered: false }
    }

    pub fn detached(size: u32) -> Self {
        Self { size, canvas: None, rendered: false }
    }

    /// Wraps an existing image, e.g. an unstyled render that still needs a logo.
    pub fn from_image(img: RgbaImage) -> QRResult<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(QRError::EmptySurface);
        }
        if width != height {
            return Err(QRError::NonSquareSurface { width, height });
        }
        Ok(Self { size: width, canvas: Some(img), rendered: true })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn context(&mut self) -> Option<&mut RgbaImage> {
        self.canvas.as_mut()
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref()
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.rendered = self.canvas.is_some();
    }

    pub fn into_image(self) -> Option<RgbaImage> {
        self.canvas
    }
}


// Painter
//------------------------------------------------------------------------------

/// Rasterizes shapes in one color. A pixel is covered when its center lies
/// inside the shape. Translucent colors are blended source-over.
pub struct Painter<'a> {
    canvas: &'a mut RgbaImage,
    color: Rgba<u8>,
}

impl<'a> Painter<'a> {
    pub fn new(canvas: &'a mut RgbaImage, color: Rgba<u8>) -> Self {
        Self { canvas, color }
    }

    pub fn fill_all(&mut self) {
        let (w, h) = self.canvas.dimensions();
        self.fill_rect(Shape::rect(0.0, 0.0, w as f64, h as f64));
    }

    fn fill_rect(&mut self, rect: Shape) {
        let (x0, y0, x1, y1) = rect.bounds();
        let (w, h) = self.canvas.dimensions();
        let (xs, ys) = (pixel_span(x0, x1, w), pixel_span(y0, y1, h));
        if xs.is_empty() || ys.is_empty() {
            return;
        }

        if self.color[3] == u8::MAX {
            let rect = Rect::at(xs.start as i32, ys.start as i32).of_size(xs.len() as u32, ys.len() as u32);
            draw_filled_rect_mut(&mut *self.canvas, rect, self.color);
            return;
        }
        for y in ys {
            for x in xs.clone() {
                self.canvas.get_pixel_mut(x, y).blend(&self.color);
            }
        }
    }

    fn fill_where(&mut self, bounds: (f64, f64, f64, f64), inside: impl Fn(f64, f64) -> bool) {
        let (x0, y0, x1, y1) = bounds;
        let (w, h) = self.canvas.dimensions();
        let xs = pixel_span(x0, x1, w);
        for y in pixel_span(y0, y1, h) {
            let py = y as f64 + 0.5;
            for x in xs.clone() {
                if inside(x as f64 + 0.5, py) {
                    self.canvas.get_pixel_mut(x, y).blend(&self.color);
                }
            }
        }
    }
}

impl ShapeSink for Painter<'_> {
    fn fill(&mut self, shape: &Shape) {
        match shape {
            Shape::Rect { .. } => self.fill_rect(*shape),
            Shape::Disc { .. } | Shape::RoundRect { .. } => {
                self.fill_where(shape.bounds(), |x, y| shape.contains(x, y))
            }
        }
    }

    fn fill_frame(&mut self, outer: &Shape, inner: &Shape) {
        self.fill_where(outer.bounds(), |x, y| outer.contains(x, y) && !inner.contains(x, y));
    }
}

#[cfg(test)]
mod painter_tests {
    use image::{Rgba, RgbaImage};

    use super::Painter;
    use crate::common::{Shape, ShapeSink};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn painted(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p[3] != 0).count()
    }

    #[test]
    fn test_fill_rect_fractional_edges() {
        let mut img = RgbaImage::new(20, 20);
        Painter::new(&mut img, RED).fill(&Shape::rect(2.4, 3.6, 5.0, 2.0));
        // Columns 2..7, rows 4..6
        assert_eq!(painted(&img), 10);
        assert_eq!(*img.get_pixel(2, 4), RED);
        assert_eq!(*img.get_pixel(6, 5), RED);
        assert_eq!(*img.get_pixel(7, 5), CLEAR);
        assert_eq!(*img.get_pixel(2, 3), CLEAR);
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut img = RgbaImage::new(10, 10);
        Painter::new(&mut img, RED).fill(&Shape::rect(-5.0, 8.0, 100.0, 100.0));
        assert_eq!(painted(&img), 20);
    }

    #[test]
    fn test_fill_disc() {
        let mut img = RgbaImage::new(10, 10);
        Painter::new(&mut img, RED).fill(&Shape::disc(5.0, 5.0, 4.0));
        assert_eq!(*img.get_pixel(5, 5), RED);
        assert_eq!(*img.get_pixel(1, 5), RED);
        assert_eq!(*img.get_pixel(0, 5), CLEAR);
        assert_eq!(*img.get_pixel(9, 5), CLEAR);
        assert_eq!(*img.get_pixel(1, 1), CLEAR);
    }

    #[test]
    fn test_fill_frame_leaves_hole() {
        let mut img = RgbaImage::new(10, 10);
        let outer = Shape::rect(0.0, 0.0, 10.0, 10.0);
        let inner = Shape::rect(2.0, 2.0, 6.0, 6.0);
        Painter::new(&mut img, RED).fill_frame(&outer, &inner);
        assert_eq!(painted(&img), 100 - 36);
        assert_eq!(*img.get_pixel(5, 5), CLEAR);
        assert_eq!(*img.get_pixel(1, 5), RED);
    }

    #[test]
    fn test_translucent_blends() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        Painter::new(&mut img, Rgba([0, 0, 0, 128])).fill_all();
        let p = img.get_pixel(0, 0);
        assert_eq!(p[3], 255);
        assert!(p[0] > 100 && p[0] < 155);
    }
}
