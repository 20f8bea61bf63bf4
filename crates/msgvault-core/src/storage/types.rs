//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored encrypted message.
///
/// Records are created on successful encryption and never mutated. The
/// content hash is the unique lookup key; the password and derived key are
/// never part of the record.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRecord {
    /// Hex SHA-256 of the plaintext, unique per message
    pub content_hash: String,

    /// Base64 blob: salt ‖ IV ‖ ciphertext
    pub encrypted_blob: String,

    /// Free-form caller-supplied metadata
    pub metadata: Option<String>,

    /// When this record was stored
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    pub fn new(
        content_hash: impl Into<String>,
        encrypted_blob: impl Into<String>,
        metadata: Option<String>,
    ) -> Self {
        Self {
            content_hash: content_hash.into(),
            encrypted_blob: encrypted_blob.into(),
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// A listing row: everything about a stored message except the blob itself.
#[derive(Debug, Clone, Serialize)]
pub struct MessageSummary {
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
    pub metadata: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_sets_timestamp() {
        let before = Utc::now();
        let record = MessageRecord::new("abc123", "blob", Some("note".to_string()));
        let after = Utc::now();

        assert_eq!(record.content_hash, "abc123");
        assert_eq!(record.encrypted_blob, "blob");
        assert_eq!(record.metadata.as_deref(), Some("note"));
        assert!(record.created_at >= before && record.created_at <= after);
    }
}
