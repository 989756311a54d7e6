//! In-memory Content Service
//!
//! Keeps the document and blobs in process memory. Used by tests and dry
//! runs; can be switched into an unavailable mode to exercise error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::traits::ContentService;
use crate::domain::{AppData, DomainError, DomainResult};

#[derive(Default)]
pub struct MemoryContentService {
    document: Mutex<Option<AppData>>,
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    unavailable: AtomicBool,
    failing_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryContentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing document
    pub fn with_document(data: AppData) -> Self {
        Self {
            document: Mutex::new(Some(data)),
            ..Self::default()
        }
    }

    /// Make every call fail as if the backend were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make only `save_state` fail; loads and blob calls keep working
    pub fn set_failing_saves(&self, failing: bool) {
        self.failing_saves.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn document(&self) -> Option<AppData> {
        self.document.lock().await.clone()
    }

    pub async fn blob(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.lock().await.get(path).cloned()
    }

    pub async fn blob_count(&self) -> usize {
        self.blobs.lock().await.len()
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Unavailable("memory backend switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentService for MemoryContentService {
    async fn load_state(&self) -> DomainResult<Option<AppData>> {
        self.check_available()?;
        Ok(self.document.lock().await.clone())
    }

    async fn save_state(&self, data: &AppData) -> DomainResult<()> {
        self.check_available()?;
        if self.failing_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Unavailable("memory backend rejected the save".to_string()));
        }
        *self.document.lock().await = Some(data.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn upload_blob(&self, data: &[u8], path: &str) -> DomainResult<String> {
        self.check_available()?;
        self.blobs.lock().await.insert(path.to_string(), data.to_vec());
        Ok(format!("memory://{}", path))
    }

    async fn delete_blob(&self, path: &str) -> DomainResult<()> {
        self.check_available()?;
        self.blobs.lock().await.remove(path);
        Ok(())
    }
}
