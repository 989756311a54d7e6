//! Repository Layer
//!
//! Content backend boundary and its implementations.

mod blob_store;
mod content_repo;
mod db;
mod document_repo;
mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use blob_store::{FileBlobStore, StoredBlob};
pub use content_repo::SqliteContentService;
pub use db::{init_db, DbConnection};
pub use document_repo::{DocumentRepository, StoredDocument};
pub use memory::MemoryContentService;
pub use traits::{ContentService, DATA_DOC_KEY};
