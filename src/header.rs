use crate::error::{Result, StegError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Derived key size in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Cipher block size in bytes; also the IV length
pub const BLOCK_SIZE: usize = 16;

/// IV length prefixed to the ciphertext in the wire format
pub const IV_SIZE: usize = BLOCK_SIZE;

/// End-of-message marker appended to the wire string before embedding.
/// Never part of the base64 alphabet `[A-Za-z0-9+/=]`.
pub const TERMINATOR: &str = "%%";

/// Bits embedded per character of the framed message
pub const BITS_PER_CHAR: usize = 8;

/// Lossless image formats a carrier may be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Bmp,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }

    /// Pick the format from a path's extension.
    /// Lossy extensions are rejected; anything else unknown falls back to PNG.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" | "webp" | "gif" | "avif" => Err(StegError::LossyFormat(ext)),
            "bmp" => Ok(Self::Bmp),
            _ => Ok(Self::Png),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = StegError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "jpg" | "jpeg" | "webp" | "gif" | "avif" => {
                Err(StegError::LossyFormat(s.to_lowercase()))
            }
            _ => Err(StegError::UnsupportedAlgorithm(format!("format: {}", s))),
        }
    }
}

/// Channel layout a decoded image is converted to before embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Rgb,
    Rgba,
}

impl ColorMode {
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn from_channels(channels: usize) -> Result<Self> {
        match channels {
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(StegError::InvalidCarrier(format!(
                "unsupported channel count {}",
                other
            ))),
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = StegError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "rgba" => Ok(Self::Rgba),
            _ => Err(StegError::UnsupportedAlgorithm(format!("color: {}", s))),
        }
    }
}
