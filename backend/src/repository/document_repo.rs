//! Document Repository
//!
//! Key/value store of whole JSON documents.

use rusqlite::{params, OptionalExtension};

use super::db::DbConnection;
use crate::domain::DomainResult;

/// A stored document with its bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub body: String,
    pub revision: i64,
    pub updated_at: i64,
}

pub struct DocumentRepository {
    conn: DbConnection,
}

impl DocumentRepository {
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }

    pub async fn load(&self, key: &str) -> DomainResult<Option<StoredDocument>> {
        let conn = self.conn.lock().await;

        let doc = conn
            .query_row(
                "SELECT body, revision, updated_at FROM documents WHERE key = ?",
                params![key],
                |row| {
                    Ok(StoredDocument {
                        body: row.get(0)?,
                        revision: row.get(1)?,
                        updated_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(doc)
    }

    /// Replace the document at `key`, returning the new revision
    pub async fn save(&self, key: &str, body: &str) -> DomainResult<i64> {
        let conn = self.conn.lock().await;

        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO documents (key, body, updated_at, revision) VALUES (?1, ?2, ?3, 1)
             ON CONFLICT(key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at,
                revision = documents.revision + 1",
            params![key, body, now],
        )?;

        let revision = conn.query_row(
            "SELECT revision FROM documents WHERE key = ?",
            params![key],
            |row| row.get(0),
        )?;
        Ok(revision)
    }
}
