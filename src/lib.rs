//! # qrstyle
//!
//! A Rust library for rendering QR module matrices into styled raster images.
//! Encoding is left to any QR encoder; this crate takes the finished module grid
//! and paints it with configurable module shapes, finder pattern styles and an
//! optional centered logo.
//!
//! ## Features
//!
//! - **Module Patterns**: Square, circle, rounded and dot shaped data modules
//! - **Finder Styles**: Square, circle and rounded finder patterns, drawn as ring plus dot
//! - **Logo Overlay**: Centered logo on a white backing disc, decoded off the render path
//! - **Transparent Backgrounds**: Background fill may be skipped entirely
//! - **Export**: PNG bytes or SVG with the same geometry as the raster render
//!
//! ## Quick Start
//!
//! ### Styled Rendering
//!
//! ```rust,no_run
//! use qrstyle::{Color, CornerStyle, ModuleMatrix, Pattern, StyledRenderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Any encoder works, the renderer only needs the module grid
//! let code = qrcode::QrCode::new(b"Hello, World!")?;
//! let modules = code.to_colors().iter().map(|c| *c == qrcode::Color::Dark).collect();
//! let matrix = ModuleMatrix::from_flat(code.width(), modules)?;
//!
//! let (img, _logo) = StyledRenderer::new(&matrix)
//!     .pattern(Pattern::Circle)             // Data module shape - defaults to Pattern::Square
//!     .corner_style(CornerStyle::Rounded)   // Finder pattern shape - defaults to CornerStyle::Square
//!     .background(Color::Transparent)       // Colors - default to black on white
//!     .to_image(512)?;                      // Edge length in pixels
//!
//! img.save("styled_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Rendering With a Logo
//!
//! The logo is decoded on a background thread while the modules are painted.
//! A logo that fails to decode never fails the render; the overlay is skipped.
//!
//! ```rust,no_run
//! use qrstyle::{LogoOutcome, ModuleMatrix, StyledRenderer, Surface};
//!
//! # async fn run(matrix: ModuleMatrix) -> Result<(), Box<dyn std::error::Error>> {
//! let mut surface = Surface::new(512);
//! let outcome = StyledRenderer::new(&matrix).logo("logo.png").render(&mut surface).await;
//! if let LogoOutcome::Skipped(e) = outcome {
//!     eprintln!("Logo skipped: {e}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Render Order
//!
//! 1. Background fill, unless transparent
//! 2. Data modules, skipping the three finder blocks
//! 3. Finder patterns, ring then dot
//! 4. Logo backing disc and logo, once decoded
//!
//! Alignment patterns are ordinary modules to this crate and use the data
//! module shape.

#![allow(clippy::items_after_test_module)]

pub(crate) mod common;
pub mod export;
pub mod render;

pub use common::error::{LogoError, LogoResult, QRError, QRResult};
pub use common::geometry::{
    is_finder_region, FinderRegion, Shape, ShapeSink, FINDER_CLEAR_MARGIN, FINDER_EXCLUSION,
    FINDER_FAR_EXCLUSION, FINDER_SIZE, MIN_MODULE_COUNT,
};
pub use common::matrix::ModuleMatrix;
pub use common::metadata::{Color, ColorPair, CornerStyle, LogoSource, Pattern, StyleOptions};
pub use export::{to_png, to_svg};
pub use render::{
    overlay_logo, render_finder_patterns, render_modules, render_plain, LogoHandle, LogoLoader,
    LogoOutcome, StyledRenderer, Surface,
};
