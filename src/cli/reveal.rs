use crate::carrier::read_carrier;
use crate::error::Result;
use crate::header::ColorMode;
use crate::stego::reveal;
use log::info;
use std::path::Path;

/// Options for the reveal command
#[derive(Debug, Clone, Default)]
pub struct RevealOptions {
    pub password: String,
    /// Channel layout; detected from the image when unset. Must match what hide used.
    pub color: Option<ColorMode>,
}

/// Recover the hidden plaintext from the image at `input_path`
pub fn reveal_message(input_path: &Path, options: &RevealOptions) -> Result<String> {
    let carrier = read_carrier(input_path, options.color)?;
    let message = reveal(&carrier.bytes, &options.password)?;
    info!(
        "revealed {} bytes from {}",
        message.len(),
        input_path.display()
    );
    Ok(message)
}

/// Recover the hidden plaintext and write it to `output_path`
pub fn reveal_to_file(
    input_path: &Path,
    output_path: &Path,
    options: &RevealOptions,
) -> Result<usize> {
    let message = reveal_message(input_path, options)?;
    std::fs::write(output_path, message.as_bytes())?;
    Ok(message.len())
}
