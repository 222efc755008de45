//! Stegseal - encrypted LSB steganography for images
//!
//! Hides an AES-256-CBC encrypted text message in the least significant bit
//! of every pixel channel byte of an image, and recovers it with the same
//! passphrase.
//!
//! ## Transform Pipeline
//!
//! ```text
//! hide:   Plaintext → Encrypt → Base64 → Frame ("%%") → Embed → Carrier
//! reveal: Carrier → Extract → Unframe → Base64 → Decrypt → Plaintext
//! ```
//!
//! - **KDF**: SHA-256 of the passphrase gives the 32-byte key
//! - **Encrypt**: AES-256-CBC, random 16-byte IV, PKCS#7 padding
//! - **Wire**: base64(IV || ciphertext)
//! - **Frame**: `%%` end marker, outside the base64 alphabet
//! - **Embed**: one bit per carrier byte, MSB first, from byte 0
//!
//! Padding validation is the only integrity check. It rejects a wrong
//! passphrase with high probability but is not an authentication tag.
//!
//! ## Example
//!
//! ```
//! use stegseal::{hide, reveal};
//!
//! let carrier = vec![0u8; 1000];
//! let stego = hide(&carrier, "meet at dawn", "hunter2").unwrap();
//! assert_eq!(reveal(&stego, "hunter2").unwrap(), "meet at dawn");
//! assert!(reveal(&stego, "wrong").is_err());
//! ```

pub mod capacity;
pub mod carrier;
pub mod cli;
pub mod error;
pub mod header;
pub mod pipeline;
pub mod stego;

pub use carrier::{read_carrier, write_carrier, Carrier};
pub use error::{Result, StegError};
pub use stego::{hide, hide_with_rng, reveal};
