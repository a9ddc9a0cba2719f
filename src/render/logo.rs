use std::{borrow::Cow, fs, thread};

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{
    imageops::{self, FilterType},
    Rgba, RgbaImage,
};
use percent_encoding::percent_decode_str;
use tokio::{runtime::Handle, sync::oneshot};
use tracing::{debug, warn};

use super::{Painter, Surface};
use crate::common::{f64_to_u32, LogoError, LogoResult, LogoSource, Shape, ShapeSink};

/// Logo edge relative to the surface size.
pub const LOGO_SIZE: f64 = 0.2;
/// Radius of the white backing disc relative to the logo edge.
pub const BACKING_RADIUS: f64 = 0.6;

const BACKING: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Decoding
//------------------------------------------------------------------------------

pub fn decode_logo(src: &LogoSource) -> LogoResult<RgbaImage> {
    let bytes = match src {
        LogoSource::Bytes(b) => Cow::Borrowed(b.as_slice()),
        LogoSource::Path(p) => Cow::Owned(fs::read(p)?),
        LogoSource::DataUrl(url) => Cow::Owned(decode_data_url(url)?),
    };
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

fn decode_data_url(url: &str) -> LogoResult<Vec<u8>> {
    let (meta, payload) =
        url.strip_prefix("data:").and_then(|u| u.split_once(',')).ok_or(LogoError::InvalidDataUrl)?;
    if meta.ends_with(";base64") {
        Ok(STANDARD.decode(payload.trim())?)
    } else {
        Ok(percent_decode_str(payload).collect())
    }
}

/// Starts logo decodes off the calling thread.
pub struct LogoLoader();

impl LogoLoader {
    pub fn begin_load(src: LogoSource) -> LogoHandle {
        let (tx, rx) = oneshot::channel();
        let spawned = thread::Builder::new().name("logo-decode".to_string()).spawn(move || {
            // Receiver may be gone if the render was dropped
            let _ = tx.send(decode_logo(&src));
        });
        // On spawn failure the sender is dropped with the closure and the
        // handle resolves as interrupted
        if let Err(e) = spawned {
            warn!("Failed to spawn logo decoder: {e}");
        }
        LogoHandle { rx }
    }
}

/// Pending logo decode. Resolves exactly once, to the image or the reason it
/// could not be decoded. There is no cancellation.
pub struct LogoHandle {
    rx: oneshot::Receiver<LogoResult<RgbaImage>>,
}

impl LogoHandle {
    pub async fn ready(self) -> LogoResult<RgbaImage> {
        self.rx.await.unwrap_or_else(|_| Err(LogoError::Interrupted))
    }

    /// Blocking variant of `ready`. Safe to call from inside an async runtime:
    /// the receive then moves to a helper thread with no runtime context, and
    /// the calling worker stays blocked until the decode resolves.
    pub fn wait(self) -> LogoResult<RgbaImage> {
        let rx = self.rx;
        let received = if Handle::try_current().is_ok() {
            thread::scope(|s| s.spawn(move || rx.blocking_recv()).join().ok())
        } else {
            Some(rx.blocking_recv())
        };
        match received {
            Some(Ok(res)) => res,
            _ => Err(LogoError::Interrupted),
        }
    }
}


// Overlay
//------------------------------------------------------------------------------

#[derive(Debug)]
pub enum LogoOutcome {
    /// No logo requested.
    Absent,
    Applied,
    /// Logo requested but not composited; the base render is intact.
    Skipped(LogoError),
}

impl LogoOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Edge length and offset of the logo box on a surface of `size` pixels. The
/// edge keeps the parity of `size` so the box is centered exactly.
pub fn logo_placement(size: u32) -> (u32, u32) {
    let mut logo_sz = f64_to_u32((size as f64 * LOGO_SIZE).round()).unwrap_or(0);
    if logo_sz % 2 != size % 2 {
        logo_sz = logo_sz.saturating_sub(1);
    }
    (logo_sz, (size - logo_sz) / 2)
}

/// Paints the white backing disc and the scaled logo at the surface center.
/// Call only after the module and finder passes.
pub fn overlay_logo(surface: &mut Surface, logo: &RgbaImage) {
    let size = surface.size();
    let Some(canvas) = surface.context() else {
        return;
    };

    let center = size as f64 / 2.0;
    let radius = size as f64 * LOGO_SIZE * BACKING_RADIUS;
    debug!("Drawing logo backing of radius {radius:.2}px...");
    Painter::new(canvas, BACKING).fill(&Shape::disc(center, center, radius));

    let (logo_sz, offset) = logo_placement(size);
    if logo_sz == 0 || logo.width() == 0 || logo.height() == 0 {
        return;
    }
    debug!("Compositing {logo_sz}px logo...");
    let scaled = imageops::resize(logo, logo_sz, logo_sz, FilterType::Triangle);
    imageops::overlay(&mut *canvas, &scaled, offset as i64, offset as i64);
}

#[cfg(test)]
mod logo_overlay_tests {
    use image::{Rgba, RgbaImage};
    use test_case::test_case;

    use super::{logo_placement, overlay_logo};
    use crate::render::Surface;

    #[test_case(210, (42, 84))]
    #[test_case(211, (41, 85))]
    #[test_case(256, (50, 103))]
    #[test_case(100, (20, 40))]
    #[test_case(3, (1, 1))]
    #[test_case(2, (0, 1))]
    fn test_logo_placement(size: u32, exp: (u32, u32)) {
        assert_eq!(logo_placement(size), exp);
    }

    #[test]
    fn test_overlay_on_black() {
        let img = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]));
        let mut surface = Surface::from_image(img).unwrap();
        let logo = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        overlay_logo(&mut surface, &logo);

        let img = surface.into_image().unwrap();
        // Logo box is 40px at offset 80
        let center = img.get_pixel(100, 100);
        assert!(center[0] > 200 && center[1] < 50);
        // Backing disc of radius 24 shows between the logo box and its edge
        assert_eq!(*img.get_pixel(100, 77), Rgba([255, 255, 255, 255]));
        assert_eq!(*img.get_pixel(100, 75), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_overlay_keeps_backing_under_transparent_logo() {
        let mut surface = Surface::from_image(RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]))).unwrap();
        overlay_logo(&mut surface, &RgbaImage::new(4, 4));
        assert_eq!(*surface.image().unwrap().get_pixel(50, 50), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_overlay_detached_noop() {
        let mut surface = Surface::detached(100);
        overlay_logo(&mut surface, &RgbaImage::new(4, 4));
        assert!(surface.image().is_none());
    }
}
