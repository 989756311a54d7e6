//! Repository Layer - Core Traits
//!
//! Defines the boundary to the content backend.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{AppData, DomainResult};

/// Document key the whole channel is stored under
pub const DATA_DOC_KEY: &str = "channel-data/appData";

/// Whole-document persistence plus blob storage
///
/// There is no partial update: every save replaces the stored document.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Load the channel document; `None` when nothing was saved yet
    async fn load_state(&self) -> DomainResult<Option<AppData>>;

    /// Overwrite the channel document
    async fn save_state(&self, data: &AppData) -> DomainResult<()>;

    /// Store `data` at `path` and return a URL it can be fetched from
    async fn upload_blob(&self, data: &[u8], path: &str) -> DomainResult<String>;

    /// Remove the blob at `path`; missing blobs are not an error
    async fn delete_blob(&self, path: &str) -> DomainResult<()>;
}
