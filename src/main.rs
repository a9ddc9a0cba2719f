use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use qrcode::{EcLevel, QrCode};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use qrstyle::{
    to_png, Color, ColorPair, CornerStyle, LogoOutcome, ModuleMatrix, Pattern, StyleOptions,
    StyledRenderer,
};

/// Encode text as a QR code and render it with styled modules and finder patterns.
#[derive(Parser, Debug)]
#[command(name = "qrstyle", version)]
struct Args {
    /// Content to encode
    data: String,

    /// Output file, `.png` or `.svg`
    #[arg(short, long, default_value = "qr.png")]
    output: PathBuf,

    /// Edge length in pixels
    #[arg(short, long, default_value_t = 512)]
    size: u32,

    /// Data module shape: square, circle, rounded or dots
    #[arg(short, long)]
    pattern: Option<Pattern>,

    /// Finder pattern shape: square, circle or rounded
    #[arg(short, long)]
    corner: Option<CornerStyle>,

    #[arg(long, default_value = "#000000")]
    foreground: Color,

    /// Background color, `transparent` to skip the fill
    #[arg(long, default_value = "#ffffff")]
    background: Color,

    /// Logo image path or data url
    #[arg(long)]
    logo: Option<String>,

    /// Error correction level: L, M, Q or H
    #[arg(short, long, default_value = "M", value_parser = parse_ec_level)]
    ec_level: EcLevel,

    /// JSON style file with `pattern`, `cornerStyle` and `logo`; flags take precedence
    #[arg(long)]
    style: Option<PathBuf>,
}

fn parse_ec_level(s: &str) -> Result<EcLevel, String> {
    match s.to_ascii_uppercase().as_str() {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        _ => Err(format!("invalid error correction level: {s}")),
    }
}

fn load_style(args: &Args) -> Result<StyleOptions> {
    let mut style = match &args.style {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read style file {}", path.display()))?;
            serde_json::from_str(&raw).context("Invalid style file")?
        }
        None => StyleOptions::default(),
    };
    if let Some(p) = args.pattern {
        style.pattern = p;
    }
    if let Some(c) = args.corner {
        style.corner_style = c;
    }
    if let Some(logo) = &args.logo {
        style.logo = Some(logo.as_str().into());
    }
    Ok(style)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let style = load_style(&args)?;

    info!("Encoding {} bytes...", args.data.len());
    let code = QrCode::with_error_correction_level(args.data.as_bytes(), args.ec_level)
        .context("Failed to encode data")?;
    let modules = code.to_colors().iter().map(|c| *c == qrcode::Color::Dark).collect();
    let matrix = ModuleMatrix::from_flat(code.width(), modules)?;

    let has_logo = style.logo.is_some();
    let mut renderer = StyledRenderer::new(&matrix);
    renderer.style(style).colors(ColorPair::new(args.foreground, args.background));

    let ext = args.output.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("svg") => {
            if has_logo {
                warn!("Logo is not embedded in SVG output");
            }
            fs::write(&args.output, renderer.to_svg(args.size))?;
        }
        Some("png") => {
            let (img, outcome) = renderer.to_image(args.size)?;
            if let LogoOutcome::Skipped(e) = outcome {
                warn!("Logo not applied: {e}");
            }
            fs::write(&args.output, to_png(&img)?)?;
        }
        _ => bail!("Unsupported output format: {}", args.output.display()),
    }

    info!("QR written to {}", args.output.display());
    Ok(())
}
