use crate::error::Result;
use crate::pipeline::{decrypt, embed, encrypt_with_rng, extract, frame};
use log::debug;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Encrypt `plaintext` and hide it in a copy of `carrier`.
/// Applies: Encrypt → Base64 → Frame → Embed
pub fn hide(carrier: &[u8], plaintext: &str, passphrase: &str) -> Result<Vec<u8>> {
    hide_with_rng(carrier, plaintext, passphrase, &mut OsRng)
}

/// Same as `hide`, drawing the IV from the supplied RNG
pub fn hide_with_rng<R>(
    carrier: &[u8],
    plaintext: &str,
    passphrase: &str,
    rng: &mut R,
) -> Result<Vec<u8>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let wire = encrypt_with_rng(plaintext, passphrase, rng);
    let framed = frame(&wire);
    debug!(
        "hide: {} plaintext bytes -> {} wire chars -> {} bits into {} carrier bytes",
        plaintext.len(),
        wire.len(),
        framed.len() * 8,
        carrier.len()
    );
    embed(carrier, &framed)
}

/// Extract and decrypt the message hidden in `carrier`.
/// Applies: Extract → Unframe → Base64 → Decrypt
pub fn reveal(carrier: &[u8], passphrase: &str) -> Result<String> {
    let wire = extract(carrier)?;
    debug!(
        "reveal: found {} wire chars in {} carrier bytes",
        wire.chars().count(),
        carrier.len()
    );
    decrypt(&wire, passphrase)
}
