use crate::capacity::analyze;
use crate::carrier::{read_carrier, write_carrier};
use crate::error::Result;
use crate::header::{ColorMode, OutputFormat};
use crate::stego::hide;
use log::info;
use std::path::{Path, PathBuf};

/// Options for the hide command
#[derive(Debug, Clone, Default)]
pub struct HideOptions {
    pub password: String,
    /// Output format; taken from the output extension when unset
    pub format: Option<OutputFormat>,
    /// Channel layout; detected from the input image when unset
    pub color: Option<ColorMode>,
}

/// Default output path: `<input stem>.stego.<ext>` next to the input
pub fn default_output_path(input_path: &Path, format: OutputFormat) -> PathBuf {
    input_path.with_extension(format!("stego.{}", format.extension()))
}

/// Hide `message` in the image at `input_path`, writing the result to `output_path`.
/// Returns the number of carrier bits that now hold the framed message.
pub fn hide_message(
    input_path: &Path,
    output_path: &Path,
    message: &str,
    options: &HideOptions,
) -> Result<usize> {
    // A lossy output extension is refused even when a format is forced
    let path_format = OutputFormat::from_path(output_path)?;
    let format = options.format.unwrap_or(path_format);

    let carrier = read_carrier(input_path, options.color)?;
    let stego_bytes = hide(&carrier.bytes, message, &options.password)?;
    let used_bits = analyze(carrier.bytes.len(), message.len()).required_bits;
    let changed = carrier
        .bytes
        .iter()
        .zip(stego_bytes.iter())
        .filter(|(before, after)| before != after)
        .count();

    let stego = carrier.with_bytes(stego_bytes)?;
    write_carrier(output_path, &stego, format)?;

    info!(
        "hid {} bytes in {} ({} carrier bits used, {} bytes changed)",
        message.len(),
        output_path.display(),
        used_bits,
        changed
    );
    Ok(used_bits)
}
