//! Message service: orchestration of the encryption pipeline.
//!
//! Every operation is a stateless pipeline over its inputs plus the store:
//! no key material or password survives a call. Log events carry the
//! content hash and operation name only — never plaintext, passwords or
//! keys.

use tracing::{info, warn};

use crate::blob;
use crate::crypto;
use crate::error::{Result, VaultError};
use crate::storage::{MessageRecord, MessageStore, MessageSummary};

/// Result of a successful encryption: the packaged blob text and the
/// content hash it is stored under.
#[derive(Debug, Clone)]
pub struct EncryptOutcome {
    pub encrypted_text: String,
    pub message_hash: String,
}

/// Orchestrates key derivation, encryption and persistence.
///
/// Owns its store; persistence backends are swappable via the
/// [`MessageStore`] trait.
pub struct MessageService<S: MessageStore> {
    store: S,
}

impl<S: MessageStore> MessageService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Encrypt a message under a password and persist the result.
    ///
    /// A fresh salt and IV are generated per call, so encrypting the same
    /// message twice yields different blob text — but the same content
    /// hash, which is why the second attempt fails with
    /// `VaultError::DuplicateMessage`.
    pub fn encrypt(
        &self,
        message: &str,
        password: &str,
        metadata: Option<&str>,
    ) -> Result<EncryptOutcome> {
        let salt = crypto::generate_salt();
        let key = crypto::derive_key(password, &salt)?;
        let iv = crypto::generate_iv();

        let ciphertext = crypto::encrypt(&key, &iv, message.as_bytes());
        // Zeroized on drop; nothing below needs the key.
        drop(key);

        let encrypted_text = blob::pack(&salt, &iv, &ciphertext);
        let message_hash = blob::content_hash(message.as_bytes());

        let record = MessageRecord::new(
            message_hash.clone(),
            encrypted_text.clone(),
            metadata.map(str::to_string),
        );
        if let Err(err) = self.store.insert(&record) {
            warn!(hash = %message_hash, error = %err, "failed to store encrypted message");
            return Err(err);
        }

        info!(hash = %message_hash, "message encrypted and stored");
        Ok(EncryptOutcome {
            encrypted_text,
            message_hash,
        })
    }

    /// Decrypt blob text with a password.
    ///
    /// The salt and IV are recovered from the blob itself; the key is
    /// re-derived from the password and the stored salt.
    ///
    /// # Errors
    ///
    /// - `VaultError::MalformedBlob` if the text is not a valid blob
    /// - `VaultError::WrongPassword` if the decrypted bytes are not valid
    ///   UTF-8 (the only practical wrong-password signal in this mode)
    pub fn decrypt(&self, encrypted_text: &str, password: &str) -> Result<String> {
        let (salt, iv, ciphertext) = blob::unpack(encrypted_text)?;
        let key = crypto::derive_key(password, &salt)?;

        let plaintext = crypto::decrypt(&key, &iv, &ciphertext);
        drop(key);

        match String::from_utf8(plaintext) {
            Ok(message) => {
                info!("message decrypted");
                Ok(message)
            }
            Err(_) => {
                warn!("decryption produced invalid UTF-8 (wrong password or corrupt data)");
                Err(VaultError::WrongPassword)
            }
        }
    }

    /// Look up a stored record by content hash. Pure read-through.
    pub fn lookup(&self, message_hash: &str) -> Result<Option<MessageRecord>> {
        self.store.get(message_hash)
    }

    /// List all stored messages in insertion order. Pure read-through.
    pub fn list_all(&self) -> Result<Vec<MessageSummary>> {
        self.store.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn service() -> MessageService<SqliteStore> {
        MessageService::new(SqliteStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_encrypt_returns_blob_and_hash() {
        let service = service();
        let outcome = service
            .encrypt("hello world", "correct-horse", None)
            .unwrap();

        assert_eq!(
            outcome.message_hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert!(!outcome.encrypted_text.is_empty());
    }

    #[test]
    fn test_decrypt_does_not_touch_store() {
        // Decryption works on blob text alone, even if the record was
        // never stored in this service's database.
        let writer = service();
        let outcome = writer.encrypt("portable message", "pw-123456", None).unwrap();

        let reader = service();
        let message = reader.decrypt(&outcome.encrypted_text, "pw-123456").unwrap();
        assert_eq!(message, "portable message");
    }

    #[test]
    fn test_empty_password_rejected() {
        let service = service();
        let result = service.encrypt("message", "", None);
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));
    }

    #[test]
    fn test_lookup_absent_hash() {
        let service = service();
        assert!(service.lookup("deadbeef").unwrap().is_none());
    }
}
