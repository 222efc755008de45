use crate::error::{Result, StegError};
use crate::header::{ColorMode, OutputFormat};
use image::{DynamicImage, RgbImage, RgbaImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;

/// Decoded image as a flat, row-major, channel-interleaved byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub bytes: Vec<u8>,
}

impl Carrier {
    pub fn new(width: u32, height: u32, channels: usize, bytes: Vec<u8>) -> Result<Self> {
        ColorMode::from_channels(channels)?;
        let expected = width as usize * height as usize * channels;
        if bytes.len() != expected {
            return Err(StegError::InvalidCarrier(format!(
                "{}x{}x{} needs {} bytes, got {}",
                width,
                height,
                channels,
                expected,
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            bytes,
        })
    }

    /// Same shape, different pixel bytes
    pub fn with_bytes(&self, bytes: Vec<u8>) -> Result<Self> {
        Self::new(self.width, self.height, self.channels, bytes)
    }

    pub fn color_mode(&self) -> Result<ColorMode> {
        ColorMode::from_channels(self.channels)
    }

    /// Embedding capacity: one bit per byte
    pub fn capacity_bits(&self) -> usize {
        self.bytes.len()
    }

    /// Decode any format the `image` crate reads.
    /// With no mode given, images with an alpha channel decode as RGBA, others as RGB.
    pub fn from_image_bytes(data: &[u8], mode: Option<ColorMode>) -> Result<Self> {
        let img = image::load_from_memory(data)?;
        let mode = mode.unwrap_or_else(|| detect_color_mode(&img));
        Ok(Self::from_dynamic(img, mode))
    }

    pub fn from_dynamic(img: DynamicImage, mode: ColorMode) -> Self {
        let (width, height, bytes) = match mode {
            ColorMode::Rgb => {
                let buf = img.to_rgb8();
                (buf.width(), buf.height(), buf.into_raw())
            }
            ColorMode::Rgba => {
                let buf = img.to_rgba8();
                (buf.width(), buf.height(), buf.into_raw())
            }
        };
        Self {
            width,
            height,
            channels: mode.channels(),
            bytes,
        }
    }

    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let shape_error = || {
            StegError::InvalidCarrier(format!(
                "buffer of {} bytes does not match {}x{}x{}",
                self.bytes.len(),
                self.width,
                self.height,
                self.channels
            ))
        };
        match self.color_mode()? {
            ColorMode::Rgb => RgbImage::from_raw(self.width, self.height, self.bytes.clone())
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(shape_error),
            ColorMode::Rgba => RgbaImage::from_raw(self.width, self.height, self.bytes.clone())
                .map(DynamicImage::ImageRgba8)
                .ok_or_else(shape_error),
        }
    }

    /// Encode losslessly; any lossy re-encoding would destroy the hidden bits
    pub fn to_image_bytes(&self, format: OutputFormat) -> Result<Vec<u8>> {
        let img = self.to_dynamic()?;
        let mut output = Cursor::new(Vec::new());
        img.write_to(&mut output, format.image_format())?;
        Ok(output.into_inner())
    }
}

/// Channel layout matching the decoded image
pub fn detect_color_mode(img: &DynamicImage) -> ColorMode {
    if img.color().has_alpha() {
        ColorMode::Rgba
    } else {
        ColorMode::Rgb
    }
}

/// Read and decode an image file into a carrier
pub fn read_carrier(path: &Path, mode: Option<ColorMode>) -> Result<Carrier> {
    let data = std::fs::read(path)?;
    let carrier = Carrier::from_image_bytes(&data, mode)?;
    debug!(
        "read carrier {}: {}x{}x{}",
        path.display(),
        carrier.width,
        carrier.height,
        carrier.channels
    );
    Ok(carrier)
}

/// Encode a carrier and write it to disk
pub fn write_carrier(path: &Path, carrier: &Carrier, format: OutputFormat) -> Result<()> {
    let data = carrier.to_image_bytes(format)?;
    std::fs::write(path, &data)?;
    debug!(
        "wrote carrier {} as {:?} ({} bytes)",
        path.display(),
        format,
        data.len()
    );
    Ok(())
}
