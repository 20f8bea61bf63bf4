//! Message store trait definition.
//!
//! The `MessageStore` trait defines the interface the service needs from a
//! persistence backend. This abstraction keeps the crypto pipeline
//! independent of the backing technology (embedded SQL store, key-value
//! store, flat file).

use super::types::{MessageRecord, MessageSummary};
use crate::error::Result;

/// Durable mapping from content hash to encrypted blob + metadata.
///
/// All implementations must ensure:
/// - Content hashes are unique (insert-if-absent semantics)
/// - Records are immutable once stored
/// - `list` returns records in insertion order
pub trait MessageStore: Send + Sync {
    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::DuplicateMessage` if a record with the same
    /// content hash already exists, `VaultError::Storage` on backend
    /// failures.
    fn insert(&self, record: &MessageRecord) -> Result<()>;

    /// Point lookup by content hash.
    ///
    /// Returns `Ok(None)` if no record with the hash exists.
    fn get(&self, content_hash: &str) -> Result<Option<MessageRecord>>;

    /// Full scan of stored messages, in insertion order.
    fn list(&self) -> Result<Vec<MessageSummary>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_definition_compiles() {
        // Ensures the trait is object-safe and usable as a bound.
        fn _accepts_store<S: MessageStore>(_store: S) {}
        fn _accepts_dyn(_store: &dyn MessageStore) {}
    }
}
