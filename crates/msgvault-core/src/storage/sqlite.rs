//! SQLite message store backend.
//!
//! A single `encrypted_messages` table keyed by the plaintext content hash.
//! The blob column already carries the encryption; SQLite itself stores it
//! as opaque text.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use super::traits::MessageStore;
use super::types::{MessageRecord, MessageSummary};
use crate::error::{Result, VaultError};

/// SQLite-backed message store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a message store at the given path.
    ///
    /// The schema is created if it does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(Self::sqlite_error)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store. Used by tests; nothing survives drop.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Self::sqlite_error)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS encrypted_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                message_hash TEXT NOT NULL UNIQUE,
                encrypted_message TEXT NOT NULL,
                metadata TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(Self::sqlite_error)?;
        Ok(())
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| VaultError::Storage("SQLite connection poisoned".to_string()))
    }

    fn sqlite_error(err: rusqlite::Error) -> VaultError {
        VaultError::Storage(format!("SQLite error: {}", err))
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| VaultError::Storage(format!("Invalid stored timestamp: {}", e)))
    }
}

impl MessageStore for SqliteStore {
    fn insert(&self, record: &MessageRecord) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction().map_err(Self::sqlite_error)?;

        let result = tx.execute(
            "INSERT INTO encrypted_messages
             (message_hash, encrypted_message, metadata, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.content_hash,
                record.encrypted_blob,
                record.metadata,
                record.created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => tx.commit().map_err(Self::sqlite_error),
            // Dropping the transaction rolls back.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(VaultError::DuplicateMessage(record.content_hash.clone()))
            }
            Err(err) => Err(Self::sqlite_error(err)),
        }
    }

    fn get(&self, content_hash: &str) -> Result<Option<MessageRecord>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                "SELECT message_hash, encrypted_message, metadata, created_at
                 FROM encrypted_messages WHERE message_hash = ?1",
                params![content_hash],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(Self::sqlite_error)?;

        match row {
            Some((content_hash, encrypted_blob, metadata, created_at)) => {
                Ok(Some(MessageRecord {
                    content_hash,
                    encrypted_blob,
                    metadata,
                    created_at: Self::parse_timestamp(&created_at)?,
                }))
            }
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<MessageSummary>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT message_hash, created_at, metadata
                 FROM encrypted_messages ORDER BY id",
            )
            .map_err(Self::sqlite_error)?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .map_err(Self::sqlite_error)?;

        let mut summaries = Vec::new();
        for row in rows {
            let (content_hash, created_at, metadata) = row.map_err(Self::sqlite_error)?;
            summaries.push(MessageSummary {
                content_hash,
                created_at: Self::parse_timestamp(&created_at)?,
                metadata,
            });
        }
        Ok(summaries)
    }
}
