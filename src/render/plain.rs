use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::common::{ColorPair, ModuleMatrix, QRError, QRResult};

/// Unstyled render used when a styled render could not run: every dark module
/// is a plain square, finder patterns included, no logo.
pub fn render_plain(matrix: &ModuleMatrix, size: u32, colors: &ColorPair) -> QRResult<RgbaImage> {
    if size == 0 {
        return Err(QRError::EmptySurface);
    }
    debug!("Rendering plain QR of {size}px...");

    let clear = Rgba([0, 0, 0, 0]);
    let fg = colors.foreground.to_pixel().unwrap_or(clear);
    let bg = colors.background.to_pixel().unwrap_or(clear);
    let module_sz = matrix.module_size(size);
    let last = matrix.width() - 1;

    let mut canvas = RgbaImage::new(size, size);
    for i in 0..size {
        let r = (((i as f64 + 0.5) / module_sz) as usize).min(last);
        for j in 0..size {
            let c = (((j as f64 + 0.5) / module_sz) as usize).min(last);
            canvas.put_pixel(j, i, if matrix.get(r, c) { fg } else { bg });
        }
    }

    Ok(canvas)
}
