//! AES-256-GCM encryption for the local credential file.
//!
//! Ciphertext is a colon-delimited hex triple `iv:authTag:ciphertext`.
//! Other tools on the same machine read and write this exact format, so it
//! must not change.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use rand::Rng;
use zeroize::Zeroize;

use crate::error::CipherError;

/// Key size in bytes.
pub const KEY_LEN: usize = 32;

/// GCM nonce size in bytes.
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag size in bytes.
pub const TAG_LEN: usize = 16;

/// A 256-bit symmetric key. Zeroed on drop.
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill(&mut bytes);
        Self(bytes)
    }

    /// Parse a key from exactly 64 hex characters.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidKey` for any other input.
    pub fn from_hex(key_hex: &str) -> Result<Self, CipherError> {
        if key_hex.len() != KEY_LEN * 2 {
            return Err(CipherError::InvalidKey);
        }

        let mut bytes = [0u8; KEY_LEN];
        hex::decode_to_slice(key_hex, &mut bytes).map_err(|_| CipherError::InvalidKey)?;
        Ok(Self(bytes))
    }

    /// Hex encoding of the key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(<redacted>)")
    }
}

/// Encrypt `plaintext` into the `iv:authTag:ciphertext` format.
///
/// # Errors
///
/// Returns `CipherError::EncryptionFailed` if the AEAD rejects the input.
pub fn encrypt(plaintext: &str, key: &EncryptionKey) -> Result<String, CipherError> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // aes-gcm appends the tag to the ciphertext.
    let sealed = key
        .cipher()
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| CipherError::EncryptionFailed)?;
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

    Ok(format!(
        "{}:{}:{}",
        hex::encode(nonce_bytes),
        hex::encode(tag),
        hex::encode(ciphertext)
    ))
}

/// Decrypt a value produced by [`encrypt`].
///
/// Every field is validated before it reaches the cipher, so malformed
/// input yields an error rather than a panic.
///
/// # Errors
///
/// Returns `CipherError` if the format is wrong, a field is not hex, the
/// nonce or tag has the wrong length, or authentication fails.
pub fn decrypt(encoded: &str, key: &EncryptionKey) -> Result<String, CipherError> {
    let mut parts = encoded.trim().split(':');
    let (iv_hex, tag_hex, ciphertext_hex) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(iv), Some(tag), Some(ct), None) => (iv, tag, ct),
            _ => {
                return Err(CipherError::InvalidFormat(
                    "expected iv:authTag:ciphertext".to_string(),
                ))
            }
        };

    let iv = hex::decode(iv_hex)?;
    if iv.len() != NONCE_LEN {
        return Err(CipherError::NonceLength {
            expected: NONCE_LEN,
            actual: iv.len(),
        });
    }

    let tag = hex::decode(tag_hex)?;
    if tag.len() != TAG_LEN {
        return Err(CipherError::InvalidFormat(format!(
            "auth tag must be {} bytes, got {}",
            TAG_LEN,
            tag.len()
        )));
    }

    let mut sealed = hex::decode(ciphertext_hex)?;
    sealed.extend_from_slice(&tag);

    let plaintext = key
        .cipher()
        .decrypt(Nonce::from_slice(&iv), sealed.as_slice())
        .map_err(|_| CipherError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| CipherError::DecryptionFailed)
}
