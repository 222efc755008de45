//! One-bit-per-byte LSB embedding of a framed message into a flat carrier buffer.
//!
//! Each character of the framed message contributes 8 bits, most significant
//! bit first, written into carrier bytes `0..8·len` in order. Extraction
//! always scans the whole carrier since the reader has no length prefix.

use crate::error::{Result, StegError};
use crate::header::BITS_PER_CHAR;
use crate::pipeline::frame::terminator_position;

/// Number of carrier bytes needed to hold a framed message
pub fn required_bits(framed: &str) -> usize {
    framed.chars().count() * BITS_PER_CHAR
}

/// Map each char to its 8-bit code; anything above U+00FF cannot be embedded
fn char_codes(framed: &str) -> Result<Vec<u8>> {
    framed
        .chars()
        .map(|c| {
            u8::try_from(c).map_err(|_| {
                StegError::MalformedInput(format!(
                    "character U+{:04X} does not fit in 8 bits",
                    c as u32
                ))
            })
        })
        .collect()
}

/// Overwrite the LSBs of the leading carrier bytes with the framed message.
/// The carrier is left untouched when the message does not fit.
/// Returns the number of bits written.
pub fn embed_in_place(carrier: &mut [u8], framed: &str) -> Result<usize> {
    let codes = char_codes(framed)?;
    let required = codes.len() * BITS_PER_CHAR;
    if required > carrier.len() {
        return Err(StegError::Capacity {
            required_bits: required,
            available_bits: carrier.len(),
        });
    }

    for (slot, code) in carrier.chunks_exact_mut(BITS_PER_CHAR).zip(codes.iter()) {
        for (bit, byte) in slot.iter_mut().enumerate() {
            let value = (code >> (BITS_PER_CHAR - 1 - bit)) & 1;
            *byte = (*byte & 0xFE) | value;
        }
    }

    Ok(required)
}

/// Embed into a copy of the carrier; the caller's buffer is not modified
pub fn embed(carrier: &[u8], framed: &str) -> Result<Vec<u8>> {
    let required = required_bits(framed);
    if required > carrier.len() {
        return Err(StegError::Capacity {
            required_bits: required,
            available_bits: carrier.len(),
        });
    }

    let mut output = carrier.to_vec();
    embed_in_place(&mut output, framed)?;
    Ok(output)
}

/// Reassemble 8-bit codes from every full group of 8 carrier LSBs
fn collect_codes(carrier: &[u8]) -> Vec<u8> {
    let mut codes = Vec::with_capacity(carrier.len() / BITS_PER_CHAR);
    codes.extend(
        carrier
            .chunks_exact(BITS_PER_CHAR)
            .map(|chunk| chunk.iter().fold(0u8, |acc, byte| (acc << 1) | (byte & 1))),
    );
    codes
}

/// Read the framed message back out of the carrier, without the terminator.
/// Trailing bytes that do not complete an 8-bit group are ignored.
pub fn extract(carrier: &[u8]) -> Result<String> {
    let codes = collect_codes(carrier);
    let end = terminator_position(&codes).ok_or(StegError::NotFound)?;
    // Codes are 0..=255, read back as Latin-1 code points
    Ok(codes[..end].iter().map(|&code| char::from(code)).collect())
}
