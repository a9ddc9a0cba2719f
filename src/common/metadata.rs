use std::{fmt, path::PathBuf, str::FromStr};

use base64::{engine::general_purpose::STANDARD, Engine};
use image::Rgba;
use serde::{Deserialize, Serialize};

use super::{QRError, QRResult};

// Module pattern
//------------------------------------------------------------------------------

/// Shape painted for every generic data module.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    #[default]
    Square,
    Circle,
    Rounded,
    Dots,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [Pattern::Square, Pattern::Circle, Pattern::Rounded, Pattern::Dots];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Rounded => "rounded",
            Self::Dots => "dots",
        }
    }
}

impl FromStr for Pattern {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(Self::Square),
            "circle" => Ok(Self::Circle),
            "rounded" => Ok(Self::Rounded),
            "dots" => Ok(Self::Dots),
            _ => Err(QRError::InvalidPattern(s.to_string())),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// Corner style
//------------------------------------------------------------------------------

/// Shape family of the three finder patterns, shared by ring and dot.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    #[default]
    Square,
    Circle,
    Rounded,
}

impl CornerStyle {
    pub const ALL: [CornerStyle; 3] = [CornerStyle::Square, CornerStyle::Circle, CornerStyle::Rounded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Rounded => "rounded",
        }
    }
}

impl FromStr for CornerStyle {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(Self::Square),
            "circle" => Ok(Self::Circle),
            "rounded" => Ok(Self::Rounded),
            _ => Err(QRError::InvalidCornerStyle(s.to_string())),
        }
    }
}

impl fmt::Display for CornerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}


// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Transparent,
    Rgba(u8, u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::Rgba(255, 255, 255, 255);

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgba(r, g, b, 255)
    }

    /// Pixel value to paint, `None` for the transparent sentinel.
    pub fn to_pixel(self) -> Option<Rgba<u8>> {
        match self {
            Self::Transparent => None,
            Self::Rgba(r, g, b, a) => Some(Rgba([r, g, b, a])),
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }
}

impl FromStr for Color {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        let invalid = || QRError::InvalidColor(s.to_string());
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "transparent" => return Ok(Self::Transparent),
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            _ => {}
        }

        let hex = lowered.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::Rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = QRError;

    fn try_from(s: String) -> QRResult<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Transparent => f.write_str("transparent"),
            Self::Rgba(r, g, b, 255) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Rgba(r, g, b, a) => write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct ColorPair {
    pub foreground: Color,
    pub background: Color,
}

impl ColorPair {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self { foreground, background }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self { foreground: Color::BLACK, background: Color::WHITE }
    }
}


// Logo source
//------------------------------------------------------------------------------

/// Reference to a logo image. Decoding happens later, off the render path.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(from = "String")]
pub enum LogoSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
    /// `data:<mime>;base64,<payload>` as produced by browser file readers.
    DataUrl(String),
}

impl LogoSource {
    pub fn to_reference(&self) -> String {
        match self {
            Self::Bytes(b) => format!("data:application/octet-stream;base64,{}", STANDARD.encode(b)),
            Self::Path(p) => p.display().to_string(),
            Self::DataUrl(u) => u.clone(),
        }
    }
}

impl From<String> for LogoSource {
    fn from(s: String) -> Self {
        if s.starts_with("data:") {
            Self::DataUrl(s)
        } else {
            Self::Path(PathBuf::from(s))
        }
    }
}

impl From<&str> for LogoSource {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl Serialize for LogoSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_reference())
    }
}

// Style options
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOptions {
    pub pattern: Pattern,
    pub corner_style: CornerStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoSource>,
}

#[cfg(test)]
mod style_options_tests {
    use std::path::PathBuf;

    use super::{CornerStyle, LogoSource, Pattern, StyleOptions};

    #[test]
    fn test_deserialize_style_options() {
        let opts: StyleOptions = serde_json::from_str(
            r#"{"pattern":"dots","cornerStyle":"rounded","logo":"data:image/png;base64,AAAA"}"#,
        )
        .unwrap();
        assert_eq!(opts.pattern, Pattern::Dots);
        assert_eq!(opts.corner_style, CornerStyle::Rounded);
        assert_eq!(opts.logo, Some(LogoSource::DataUrl("data:image/png;base64,AAAA".into())));
    }

    #[test]
    fn test_deserialize_defaults() {
        let opts: StyleOptions = serde_json::from_str(r#"{"logo":"assets/logo.png"}"#).unwrap();
        assert_eq!(opts.pattern, Pattern::Square);
        assert_eq!(opts.corner_style, CornerStyle::Square);
        assert_eq!(opts.logo, Some(LogoSource::Path(PathBuf::from("assets/logo.png"))));
    }

    #[test]
    fn test_bytes_reference() {
        let src = LogoSource::Bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(src.to_reference(), "data:application/octet-stream;base64,3q2+7w==");
    }
}
