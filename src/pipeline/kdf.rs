use crate::header::KEY_SIZE;
use sha2::{Digest, Sha256};

/// 256-bit symmetric key derived from a passphrase
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Derive the cipher key as the SHA-256 digest of the passphrase's UTF-8 bytes.
/// Deterministic; an empty passphrase is accepted.
pub fn derive_key(passphrase: &str) -> SymmetricKey {
    let digest = Sha256::digest(passphrase.as_bytes());
    SymmetricKey(digest.into())
}
