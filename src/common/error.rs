use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum QRError {
    // Module matrix
    #[error("Empty module matrix")]
    EmptyMatrix,
    #[error("Module matrix is not square: row {row} has {len} modules, expected {width}")]
    NonSquareMatrix { row: usize, len: usize, width: usize },
    #[error("Module matrix too small: {0} modules wide, at least 21 required")]
    MatrixTooSmall(usize),
    #[error("Module buffer holds {len} modules, expected {width}x{width}")]
    ModuleCountMismatch { len: usize, width: usize },

    // Style
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid module pattern: {0}")]
    InvalidPattern(String),
    #[error("Invalid corner style: {0}")]
    InvalidCornerStyle(String),

    // Surface & export
    #[error("Surface has zero size")]
    EmptySurface,
    #[error("Surface is not square: {width}x{height}")]
    NonSquareSurface { width: u32, height: u32 },
    #[error("Casting failed")]
    CastingFailed,
    #[error("Image encoding failed: {0}")]
    Encoding(String),
}

pub type QRResult<T> = Result<T, QRError>;

// Logo error
//------------------------------------------------------------------------------

/// Reasons a logo could not be composited. These never fail a render; the
/// overlay is skipped and the base render is kept.
#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Failed to read logo: {0}")]
    Read(#[from] std::io::Error),
    #[error("Malformed data url")]
    InvalidDataUrl,
    #[error("Failed to decode base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to decode logo image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Logo decoder stopped before reporting a result")]
    Interrupted,
    #[error("Surface has no drawing context")]
    NoContext,
}

pub type LogoResult<T> = Result<T, LogoError>;
