//! Storage layer: the message store trait and its SQLite backend.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
pub use traits::MessageStore;
pub use types::{MessageRecord, MessageSummary};
