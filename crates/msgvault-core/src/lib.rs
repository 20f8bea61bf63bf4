//! # Msgvault Core
//!
//! Core library for msgvault - password-based message encryption with
//! content-addressed storage.
//!
//! This crate provides the cryptographic pipeline, blob format and storage
//! abstractions independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation (PBKDF2-HMAC-SHA256) and AES-256-CFB
//! - **blob**: the `salt ‖ IV ‖ ciphertext` base64 format and content hashing
//! - **storage**: message store trait and SQLite backend
//! - **service**: the encrypt/decrypt/lookup/list pipeline
//!
//! ## Blob format
//!
//! Every encrypted message is a base64 string decoding to exactly
//! `16-byte salt ‖ 16-byte IV ‖ N-byte ciphertext`, where N equals the
//! plaintext length. Salt and IV are fresh per message; the content hash
//! (hex SHA-256 of the plaintext) is the storage key.

pub mod blob;
pub mod crypto;
pub mod error;
pub mod service;
pub mod storage;

pub use error::{Result, VaultError};
pub use service::{EncryptOutcome, MessageService};
pub use storage::{MessageStore, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
