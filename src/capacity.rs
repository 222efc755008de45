use crate::header::{BITS_PER_CHAR, BLOCK_SIZE, IV_SIZE, TERMINATOR};
use serde::Serialize;

/// Padded ciphertext length for a plaintext of `plaintext_bytes` bytes.
/// PKCS#7 always adds at least one byte, so a full block gains another.
pub fn padded_len(plaintext_bytes: usize) -> usize {
    (plaintext_bytes / BLOCK_SIZE + 1) * BLOCK_SIZE
}

/// Length in chars of the framed message: base64(iv || ciphertext) + terminator
pub fn framed_len(plaintext_bytes: usize) -> usize {
    let raw = IV_SIZE + padded_len(plaintext_bytes);
    4 * raw.div_ceil(3) + TERMINATOR.len()
}

/// Summary of how a message maps onto a carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityAnalysis {
    pub carrier_bytes: usize,
    pub plaintext_bytes: usize,
    pub framed_chars: usize,
    pub required_bits: usize,
}

impl CapacityAnalysis {
    pub fn fits(&self) -> bool {
        self.required_bits <= self.carrier_bytes
    }

    pub fn headroom_bits(&self) -> usize {
        self.carrier_bytes.saturating_sub(self.required_bits)
    }
}

/// Analyze a plaintext length against a carrier length
pub fn analyze(carrier_bytes: usize, plaintext_bytes: usize) -> CapacityAnalysis {
    let framed_chars = framed_len(plaintext_bytes);
    CapacityAnalysis {
        carrier_bytes,
        plaintext_bytes,
        framed_chars,
        required_bits: framed_chars * BITS_PER_CHAR,
    }
}

/// Largest plaintext (in UTF-8 bytes) that fits in a carrier of the given length.
/// None if not even an empty message fits.
pub fn max_plaintext_bytes(carrier_bytes: usize) -> Option<usize> {
    let chars = carrier_bytes / BITS_PER_CHAR;
    let quads = chars.checked_sub(TERMINATOR.len())? / 4;
    // iv + ciphertext may span at most 3 bytes per base64 quad
    let blocks = (3 * quads / BLOCK_SIZE).checked_sub(IV_SIZE / BLOCK_SIZE)?;
    if blocks == 0 {
        return None;
    }
    Some(blocks * BLOCK_SIZE - 1)
}
