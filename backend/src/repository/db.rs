//! Database Connection and Setup
//!
//! Opens the SQLite database and runs migrations.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared handle to the channel database
pub type DbConnection = Arc<Mutex<Connection>>;

/// Open (or create) the database at `db_path` and bring the schema up to date.
///
/// `":memory:"` opens a private in-memory database.
pub fn init_db(db_path: &Path) -> DomainResult<DbConnection> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()?
    } else {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Connection::open(db_path)
            .map_err(|e| DomainError::Unavailable(format!("Failed to open {}: {}", db_path.display(), e)))?
    };

    run_migrations(&conn)?;
    log::debug!("Database ready at {}", db_path.display());

    Ok(Arc::new(Mutex::new(conn)))
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    // Documents table - one row per stored document
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            key TEXT PRIMARY KEY,
            body TEXT NOT NULL,
            revision INTEGER NOT NULL DEFAULT 0,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}
