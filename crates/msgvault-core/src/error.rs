//! Error types for msgvault core operations.
//!
//! This module defines the error taxonomy for the encryption pipeline and
//! the storage collaborator. Errors are descriptive at the core level; the
//! CLI layer maps them to user-friendly messages.

use thiserror::Error;

/// Result type alias for msgvault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for msgvault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Blob text does not base64-decode, or decodes to fewer bytes than
    /// a full salt + IV header
    #[error("Malformed encrypted blob: {0}")]
    MalformedBlob(String),

    /// Decryption produced bytes that are not valid UTF-8. The cipher mode
    /// carries no integrity tag, so this is the only practical signal that
    /// the password was wrong (or the ciphertext was corrupted).
    #[error("Wrong password or corrupt data")]
    WrongPassword,

    /// A message with the same content hash is already stored
    #[error("Message with hash {0} already exists")]
    DuplicateMessage(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Key derivation or cipher parameter error
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Storage(err.to_string())
    }
}
