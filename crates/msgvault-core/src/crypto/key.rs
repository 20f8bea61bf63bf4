//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module derives encryption keys from passwords. PBKDF2 with a high
//! iteration count makes offline brute-force attacks expensive while staying
//! deterministic, which decryption relies on.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VaultError};

use super::{KEY_LEN, SALT_LEN};

/// PBKDF2 iteration count.
///
/// Must never be lowered across versions without a migration plan: blobs
/// written at a higher count would silently derive a different key.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A symmetric key derived from a password.
///
/// Key material is zeroized from memory when dropped, keeping the window of
/// exposure to a single encrypt/decrypt call.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate cipher
    /// operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh random salt from the OS CSPRNG.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive a 256-bit encryption key from a password and salt.
///
/// # Security
///
/// - Same password + salt always produces the same key (deterministic)
/// - Different salt produces a different key (the salt is stored with the
///   blob so decryption can re-derive the key)
///
/// # Errors
///
/// Returns `VaultError::InvalidInput` if the password is empty.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(VaultError::InvalidInput(
            "Password cannot be empty".to_string(),
        ));
    }

    let mut key_bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key_bytes);

    Ok(DerivedKey::from_bytes(key_bytes))
}
