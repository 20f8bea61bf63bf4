//! Cryptographic operations for msgvault.
//!
//! This module provides key derivation and symmetric encryption using
//! well-audited RustCrypto libraries:
//! - **PBKDF2-HMAC-SHA256**: password-based key derivation
//! - **AES-256-CFB**: symmetric encryption in a stream-compatible mode
//!
//! ## Security Model
//!
//! - Fresh random salt and IV per encrypted message, from the OS CSPRNG
//! - Derived keys are zeroized from memory on drop
//! - No plaintext passwords stored or logged
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the stored ciphertext
//! - Offline brute-force attacks on the password
//!
//! We do NOT defend against:
//! - Ciphertext tampering (CFB carries no integrity tag; a wrong password
//!   and a tampered blob are indistinguishable to the caller)
//! - Compromised OS / keylogger

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt, generate_iv};
pub use key::{derive_key, generate_salt, DerivedKey};

/// Salt length in bytes, stored in the blob header.
pub const SALT_LEN: usize = 16;

/// IV length in bytes, stored in the blob header.
pub const IV_LEN: usize = 16;

/// Derived key length in bytes (256-bit AES key).
pub const KEY_LEN: usize = 32;
