//! Encrypted blob packing and content hashing.
//!
//! The on-disk/wire format is `salt ‖ IV ‖ ciphertext`, base64-encoded with
//! the standard alphabet. The first 16 decoded bytes are always the salt,
//! the next 16 the IV, and the remainder the ciphertext (same length as the
//! original plaintext — CFB does not pad).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::crypto::{IV_LEN, SALT_LEN};
use crate::error::{Result, VaultError};

/// Decoded length of the salt + IV header.
const HEADER_LEN: usize = SALT_LEN + IV_LEN;

/// Pack salt, IV and ciphertext into a base64 blob string.
pub fn pack(salt: &[u8; SALT_LEN], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> String {
    let mut data = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    data.extend_from_slice(salt);
    data.extend_from_slice(iv);
    data.extend_from_slice(ciphertext);
    STANDARD.encode(data)
}

/// Unpack a blob string into its salt, IV and ciphertext parts.
///
/// # Errors
///
/// Returns `VaultError::MalformedBlob` if the text is not valid base64 or
/// decodes to fewer than 32 bytes (cannot contain a full salt + IV).
pub fn unpack(blob: &str) -> Result<([u8; SALT_LEN], [u8; IV_LEN], Vec<u8>)> {
    let data = STANDARD
        .decode(blob.trim())
        .map_err(|e| VaultError::MalformedBlob(format!("Invalid base64: {}", e)))?;

    if data.len() < HEADER_LEN {
        return Err(VaultError::MalformedBlob(format!(
            "Decoded blob is {} bytes, need at least {} for salt and IV",
            data.len(),
            HEADER_LEN
        )));
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&data[..SALT_LEN]);
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&data[SALT_LEN..HEADER_LEN]);
    let ciphertext = data[HEADER_LEN..].to_vec();

    Ok((salt, iv, ciphertext))
}

/// Compute the hex SHA-256 content hash of a plaintext message.
///
/// Used purely as a content-addressed lookup key for the store, not as an
/// integrity check on the ciphertext.
pub fn content_hash(plaintext: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext);
    hex::encode(hasher.finalize())
}
