mod finder;
mod logo;
mod modules;
mod plain;
mod surface;

pub use finder::{draw_finder_patterns, finder_origins, render_finder_patterns};
use finder::paint_finder_patterns;
pub use logo::{
    decode_logo, logo_placement, overlay_logo, LogoHandle, LogoLoader, LogoOutcome, LOGO_SIZE,
};
pub use modules::{draw_modules, render_modules};
pub use plain::render_plain;
pub use surface::{Painter, Surface};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::common::{
    Color, ColorPair, CornerStyle, LogoError, LogoResult, LogoSource, ModuleMatrix, Pattern,
    QRResult, StyleOptions,
};
use crate::export::to_svg;

pub struct StyledRenderer<'a> {
    matrix: &'a ModuleMatrix,
    pattern: Pattern,
    corner_style: CornerStyle,
    colors: ColorPair,
    logo: Option<LogoSource>,
}

impl<'a> StyledRenderer<'a> {
    pub fn new(matrix: &'a ModuleMatrix) -> Self {
        Self {
            matrix,
            pattern: Pattern::Square,
            corner_style: CornerStyle::Square,
            colors: ColorPair::default(),
            logo: None,
        }
    }

    pub fn matrix(&mut self, matrix: &'a ModuleMatrix) -> &mut Self {
        self.matrix = matrix;
        self
    }

    pub fn pattern(&mut self, pattern: Pattern) -> &mut Self {
        self.pattern = pattern;
        self
    }

    pub fn corner_style(&mut self, corner_style: CornerStyle) -> &mut Self {
        self.corner_style = corner_style;
        self
    }

    pub fn colors(&mut self, colors: ColorPair) -> &mut Self {
        self.colors = colors;
        self
    }

    pub fn foreground(&mut self, color: Color) -> &mut Self {
        self.colors.foreground = color;
        self
    }

    pub fn background(&mut self, color: Color) -> &mut Self {
        self.colors.background = color;
        self
    }

    pub fn logo(&mut self, logo: impl Into<LogoSource>) -> &mut Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn unset_logo(&mut self) -> &mut Self {
        self.logo = None;
        self
    }

    pub fn style(&mut self, style: StyleOptions) -> &mut Self {
        self.pattern = style.pattern;
        self.corner_style = style.corner_style;
        self.logo = style.logo;
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Modules: {}, Pattern: {}, Corners: {}, Colors: {} on {}, Logo: {} }}",
            self.matrix.width(),
            self.pattern,
            self.corner_style,
            self.colors.foreground,
            self.colors.background,
            if self.logo.is_some() { "Some" } else { "None" }
        )
    }
}


// Render pipeline
//------------------------------------------------------------------------------

impl StyledRenderer<'_> {
    /// Module and finder passes. Both run synchronously and leave a detached
    /// surface untouched.
    pub fn render_base(&self, surface: &mut Surface) {
        debug!("Rendering QR {}...", self.metadata());
        render_modules(surface, self.matrix, self.pattern, &self.colors);
        if !surface.is_rendered() {
            return;
        }

        let module_sz = self.matrix.module_size(surface.size());
        paint_finder_patterns(surface, module_sz, self.matrix.width(), self.corner_style, self.colors.foreground);
    }

    /// Full render. The logo decode starts before the base passes and the
    /// overlay runs once it resolves.
    pub async fn render(&self, surface: &mut Surface) -> LogoOutcome {
        let pending = self.logo.clone().map(LogoLoader::begin_load);
        self.render_base(surface);
        match pending {
            None => LogoOutcome::Absent,
            Some(handle) => {
                debug!("Waiting for logo...");
                Self::finish_logo(surface, handle.ready().await)
            }
        }
    }

    /// Same as `render` without an executor. It also works from inside a tokio
    /// runtime, but then blocks that worker thread until the logo decodes.
    pub fn render_blocking(&self, surface: &mut Surface) -> LogoOutcome {
        let pending = self.logo.clone().map(LogoLoader::begin_load);
        self.render_base(surface);
        match pending {
            None => LogoOutcome::Absent,
            Some(handle) => {
                debug!("Waiting for logo...");
                Self::finish_logo(surface, handle.wait())
            }
        }
    }

    fn finish_logo(surface: &mut Surface, decoded: LogoResult<RgbaImage>) -> LogoOutcome {
        if !surface.is_rendered() {
            return LogoOutcome::Skipped(LogoError::NoContext);
        }
        match decoded {
            Ok(logo) => {
                overlay_logo(surface, &logo);
                LogoOutcome::Applied
            }
            Err(e) => {
                warn!("Skipping logo overlay: {e}");
                LogoOutcome::Skipped(e)
            }
        }
    }

    /// Renders onto `surface` and hands back its image, or a plain render of the
    /// same size when the surface has no drawing context.
    pub fn render_or_plain(&self, mut surface: Surface) -> QRResult<(RgbaImage, LogoOutcome)> {
        let outcome = self.render_blocking(&mut surface);
        let size = surface.size();
        match surface.into_image() {
            Some(img) => Ok((img, outcome)),
            None => {
                warn!("Styled render unavailable, falling back to plain render");
                Ok((render_plain(self.matrix, size, &self.colors)?, outcome))
            }
        }
    }

    /// Blocking render onto a fresh surface; see `render_blocking` for how it
    /// behaves inside an async runtime.
    pub fn to_image(&self, size: u32) -> QRResult<(RgbaImage, LogoOutcome)> {
        self.render_or_plain(Surface::new(size))
    }

    pub fn to_svg(&self, size: u32) -> String {
        let style = StyleOptions { pattern: self.pattern, corner_style: self.corner_style, logo: None };
        to_svg(self.matrix, &style, &self.colors, size)
    }
}

#[cfg(test)]
mod render_pipeline_tests {
    use image::{Rgba, RgbaImage};

    use super::{LogoOutcome, StyledRenderer, Surface};
    use crate::common::{Color, CornerStyle, LogoError, LogoSource, ModuleMatrix, Pattern, QRError};
    use crate::export::to_png;

    fn checker() -> ModuleMatrix {
        ModuleMatrix::from_flat(25, (0..625).map(|i| (i / 25 + i % 25) % 2 == 0).collect()).unwrap()
    }

    #[test]
    fn test_render_blocking_without_logo() {
        let matrix = checker();
        let mut surface = Surface::new(250);
        let outcome = StyledRenderer::new(&matrix).render_blocking(&mut surface);
        assert!(matches!(outcome, LogoOutcome::Absent));
        assert!(surface.is_rendered());
        // Finder ring at the top-left corner, data module (10, 10) is dark
        let img = surface.image().unwrap();
        assert_eq!(*img.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(105, 105), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(115, 105), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_render_blocking_with_logo() {
        let matrix = checker();
        let logo = to_png(&RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]))).unwrap();
        let mut surface = Surface::new(250);
        let outcome = StyledRenderer::new(&matrix)
            .pattern(Pattern::Dots)
            .logo(LogoSource::Bytes(logo))
            .render_blocking(&mut surface);
        assert!(outcome.is_applied());
        let center = *surface.image().unwrap().get_pixel(125, 125);
        assert!(center[0] > 200 && center[1] < 50);
    }

    #[test]
    fn test_render_detached_skips_logo() {
        let matrix = checker();
        let mut surface = Surface::detached(250);
        let outcome = StyledRenderer::new(&matrix).logo("missing.png").render_blocking(&mut surface);
        assert!(matches!(outcome, LogoOutcome::Skipped(LogoError::NoContext)));
        assert!(!surface.is_rendered());
    }

    #[test]
    fn test_to_image() {
        let matrix = checker();
        let (img, outcome) =
            StyledRenderer::new(&matrix).corner_style(CornerStyle::Circle).to_image(100).unwrap();
        assert_eq!(img.dimensions(), (100, 100));
        assert!(matches!(outcome, LogoOutcome::Absent));
        // Circle ring leaves the pattern's corner pixel empty
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(StyledRenderer::new(&matrix).to_image(0).unwrap_err(), QRError::EmptySurface);
    }

    #[test]
    fn test_render_or_plain_falls_back() {
        let matrix = checker();
        let (img, outcome) = StyledRenderer::new(&matrix)
            .pattern(Pattern::Circle)
            .foreground(Color::rgb(0, 128, 0))
            .render_or_plain(Surface::detached(50))
            .unwrap();
        assert!(matches!(outcome, LogoOutcome::Absent));
        // Plain squares, finder corner included
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 128, 0, 255]));
        assert_eq!(*img.get_pixel(2, 0), Rgba([255, 255, 255, 255]));
    }

    #[tokio::test]
    async fn test_render_async_broken_logo() {
        let matrix = checker();
        let mut with_logo = Surface::new(250);
        let outcome = StyledRenderer::new(&matrix)
            .logo("data:image/png;base64,broken")
            .render(&mut with_logo)
            .await;
        assert!(matches!(outcome, LogoOutcome::Skipped(_)));

        let mut plain = Surface::new(250);
        StyledRenderer::new(&matrix).render(&mut plain).await;
        assert_eq!(with_logo.image(), plain.image());
    }

    #[tokio::test]
    async fn test_to_image_with_logo_inside_runtime() {
        let matrix = checker();
        let logo = to_png(&RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]))).unwrap();
        let (img, outcome) = StyledRenderer::new(&matrix).logo(LogoSource::Bytes(logo)).to_image(250).unwrap();
        assert!(outcome.is_applied());
        let center = *img.get_pixel(125, 125);
        assert!(center[0] > 200 && center[1] < 50);

        let (broken, outcome) =
            StyledRenderer::new(&matrix).logo("data:image/png;base64,broken").to_image(250).unwrap();
        assert!(matches!(outcome, LogoOutcome::Skipped(_)));
        assert_eq!(broken, StyledRenderer::new(&matrix).to_image(250).unwrap().0);
    }
}
