//! SQLite Content Service
//!
//! The channel document lives in the `documents` table; blobs go to a
//! [`FileBlobStore`].

use async_trait::async_trait;

use super::blob_store::FileBlobStore;
use super::db::DbConnection;
use super::document_repo::DocumentRepository;
use super::traits::{ContentService, DATA_DOC_KEY};
use crate::domain::{AppData, DomainError, DomainResult};

pub struct SqliteContentService {
    documents: DocumentRepository,
    blobs: FileBlobStore,
}

impl SqliteContentService {
    pub fn new(conn: DbConnection, blobs: FileBlobStore) -> Self {
        Self {
            documents: DocumentRepository::new(conn),
            blobs,
        }
    }
}

#[async_trait]
impl ContentService for SqliteContentService {
    async fn load_state(&self) -> DomainResult<Option<AppData>> {
        let Some(doc) = self.documents.load(DATA_DOC_KEY).await? else {
            return Ok(None);
        };
        let data = serde_json::from_str(&doc.body).map_err(|e| {
            DomainError::Internal(format!("Stored channel document is corrupt: {}", e))
        })?;
        log::debug!("Loaded channel document revision {}", doc.revision);
        Ok(Some(data))
    }

    async fn save_state(&self, data: &AppData) -> DomainResult<()> {
        let body = serde_json::to_string(data)?;
        let revision = self.documents.save(DATA_DOC_KEY, &body).await?;
        log::debug!("Saved channel document revision {} ({} bytes)", revision, body.len());
        Ok(())
    }

    async fn upload_blob(&self, data: &[u8], path: &str) -> DomainResult<String> {
        let stored = self.blobs.write(data, path).await?;
        log::info!("Stored blob {} ({} bytes, {})", path, stored.size, stored.content_type);
        Ok(stored.url)
    }

    async fn delete_blob(&self, path: &str) -> DomainResult<()> {
        self.blobs.delete(path).await
    }
}
