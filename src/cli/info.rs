use crate::capacity::max_plaintext_bytes;
use crate::carrier::read_carrier;
use crate::error::Result;
use crate::header::ColorMode;
use serde::Serialize;
use std::path::Path;

/// Carrier capacity report for an image file
#[derive(Debug, Clone, Serialize)]
pub struct CarrierReport {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub color: ColorMode,
    pub capacity_bits: usize,
    /// Largest UTF-8 message that fits; None if the image is too small for any
    pub max_message_bytes: Option<usize>,
}

/// Inspect an image as a carrier
pub fn carrier_report(path: &Path, color: Option<ColorMode>) -> Result<CarrierReport> {
    let carrier = read_carrier(path, color)?;
    Ok(CarrierReport {
        file: path.display().to_string(),
        width: carrier.width,
        height: carrier.height,
        channels: carrier.channels,
        color: carrier.color_mode()?,
        capacity_bits: carrier.capacity_bits(),
        max_message_bytes: max_plaintext_bytes(carrier.capacity_bits()),
    })
}

/// Display information about an image carrier
pub fn show_info(path: &Path, color: Option<ColorMode>) -> Result<String> {
    let report = carrier_report(path, color)?;

    let mut output = String::new();

    output.push_str("Stegseal Carrier Information\n");
    output.push_str("============================\n\n");

    output.push_str(&format!("File: {}\n", report.file));
    output.push_str(&format!("Dimensions: {}x{}\n", report.width, report.height));
    output.push_str(&format!(
        "Channels: {} ({:?})\n",
        report.channels, report.color
    ));
    output.push('\n');

    output.push_str("Capacity:\n");
    output.push_str(&format!("  Carrier bits: {}\n", report.capacity_bits));
    output.push_str(&format!(
        "  Raw payload: {}\n",
        format_size((report.capacity_bits / 8) as u64)
    ));
    match report.max_message_bytes {
        Some(max) => output.push_str(&format!("  Max message: {} bytes\n", max)),
        None => output.push_str("  Max message: none (image too small)\n"),
    }
    output.push('\n');

    output.push_str("Notes:\n");
    output.push_str("  Save stego images as PNG or BMP only.\n");
    output.push_str("  Any lossy re-encoding destroys the hidden message.\n");

    Ok(output)
}

/// Report as pretty-printed JSON
pub fn show_info_json(path: &Path, color: Option<ColorMode>) -> Result<String> {
    let report = carrier_report(path, color)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
