use std::{fmt::Write, io::Cursor};

use image::{ImageFormat, RgbaImage};

use crate::common::{Color, ColorPair, ModuleMatrix, QRError, QRResult, Shape, ShapeSink, StyleOptions};
use crate::render::{draw_finder_patterns, draw_modules};

// Raster
//------------------------------------------------------------------------------

pub fn to_png(img: &RgbaImage) -> QRResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| QRError::Encoding(e.to_string()))?;
    Ok(buf)
}

// Vector
//------------------------------------------------------------------------------

/// Renders the styled symbol as SVG. Geometry matches the raster render; the
/// logo is not embedded.
pub fn to_svg(matrix: &ModuleMatrix, style: &StyleOptions, colors: &ColorPair, size: u32) -> String {
    let module_sz = matrix.module_size(size);
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );
    if let Some(bg) = paint(colors.background) {
        let _ = write!(svg, r#"<rect width="{size}" height="{size}" {bg}/>"#);
    }
    if let Some(fg) = paint(colors.foreground) {
        let mut writer = SvgWriter { body: String::new() };
        draw_modules(&mut writer, matrix, style.pattern, module_sz);
        draw_finder_patterns(&mut writer, matrix, module_sz, style.corner_style);
        let _ = write!(svg, "<g {fg}>{}</g>", writer.body);
    }
    svg.push_str("</svg>");
    svg
}

fn paint(color: Color) -> Option<String> {
    match color {
        Color::Transparent => None,
        Color::Rgba(r, g, b, 255) => Some(format!(r##"fill="#{r:02x}{g:02x}{b:02x}""##)),
        Color::Rgba(r, g, b, a) => Some(format!(
            r##"fill="#{r:02x}{g:02x}{b:02x}" fill-opacity="{}""##,
            num(a as f64 / 255.0)
        )),
    }
}

/// Two decimals, trailing zeros dropped.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

struct SvgWriter {
    body: String,
}

impl SvgWriter {
    fn path_data(shape: &Shape) -> String {
        match *shape {
            Shape::Rect { x, y, w, h } => {
                format!("M{} {}h{}v{}h{}Z", num(x), num(y), num(w), num(h), num(-w))
            }
            Shape::Disc { cx, cy, r } => format!(
                "M{} {}a{r} {r} 0 1 0 {} 0a{r} {r} 0 1 0 {} 0Z",
                num(cx - r),
                num(cy),
                num(2.0 * r),
                num(-2.0 * r),
                r = num(r)
            ),
            Shape::RoundRect { x, y, w, h, r } => {
                let (sw, sh) = (w - 2.0 * r, h - 2.0 * r);
                let (rp, rn) = (num(r), num(-r));
                format!(
                    "M{} {}h{}a{r} {r} 0 0 1 {rp} {rp}v{}a{r} {r} 0 0 1 {rn} {rp}h{}a{r} {r} 0 0 1 {rn} {rn}v{}a{r} {r} 0 0 1 {rp} {rn}Z",
                    num(x + r),
                    num(y),
                    num(sw),
                    num(sh),
                    num(-sw),
                    num(-sh),
                    r = rp
                )
            }
        }
    }
}

impl ShapeSink for SvgWriter {
    fn fill(&mut self, shape: &Shape) {
        let _ = match *shape {
            Shape::Rect { x, y, w, h } => write!(
                self.body,
                r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
                num(x),
                num(y),
                num(w),
                num(h)
            ),
            Shape::Disc { cx, cy, r } => {
                write!(self.body, r#"<circle cx="{}" cy="{}" r="{}"/>"#, num(cx), num(cy), num(r))
            }
            Shape::RoundRect { x, y, w, h, r } => write!(
                self.body,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}"/>"#,
                num(x),
                num(y),
                num(w),
                num(h),
                num(r)
            ),
        };
    }

    fn fill_frame(&mut self, outer: &Shape, inner: &Shape) {
        let _ = write!(
            self.body,
            r#"<path fill-rule="evenodd" d="{}{}"/>"#,
            Self::path_data(outer),
            Self::path_data(inner)
        );
    }
}
