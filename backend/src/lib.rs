//! Channel Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Content backend abstractions and implementations
//! - commands: Admin and viewer operations over the shared state
//! - config: On-disk settings

use std::sync::Arc;

use tokio::sync::Mutex;

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;

use config::ChannelConfig;
use domain::{AppData, DomainResult};
use repository::{init_db, ContentService, FileBlobStore, SqliteContentService};

/// Application state shared across commands
pub struct AppState {
    pub service: Arc<dyn ContentService>,
    pub data: Mutex<AppData>,
    pub config: ChannelConfig,
}

impl AppState {
    /// Load the stored document, or seed and persist the default channel
    pub async fn initialize(
        service: Arc<dyn ContentService>,
        config: ChannelConfig,
    ) -> DomainResult<Self> {
        let data = match service.load_state().await? {
            Some(data) => {
                log::info!(
                    "Loaded channel: {} tabs, {} posts",
                    data.tabs.ids().len(),
                    data.posts.len()
                );
                data
            }
            None => {
                log::info!("No stored channel, seeding defaults");
                let seed = AppData::seed();
                service.save_state(&seed).await?;
                seed
            }
        };

        Ok(Self {
            service,
            data: Mutex::new(data),
            config,
        })
    }

    /// Open the SQLite-backed state described by `config`
    pub async fn open(config: ChannelConfig) -> DomainResult<Self> {
        let conn = init_db(&config.db_path())?;
        let blobs = FileBlobStore::open(config.blob_root())?;
        log::info!(
            "Opened database {} with blobs under {}",
            config.db_path().display(),
            blobs.root().display()
        );
        let service: Arc<dyn ContentService> = Arc::new(SqliteContentService::new(conn, blobs));
        Self::initialize(service, config).await
    }

    /// Copy of the current in-memory document
    pub async fn snapshot(&self) -> AppData {
        self.data.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryContentService;

    #[tokio::test]
    async fn test_initialize_seeds_empty_backend() {
        let memory = Arc::new(MemoryContentService::new());
        let state = AppState::initialize(memory.clone(), ChannelConfig::default())
            .await
            .unwrap();

        assert_eq!(state.snapshot().await, AppData::seed());
        assert_eq!(memory.save_count(), 1);
        assert_eq!(memory.document().await, Some(AppData::seed()));
    }

    #[tokio::test]
    async fn test_initialize_keeps_stored_document() {
        let mut stored = AppData::seed();
        stored.banner.title = "Stored".to_string();
        let memory = Arc::new(MemoryContentService::with_document(stored.clone()));

        let state = AppState::initialize(memory.clone(), ChannelConfig::default())
            .await
            .unwrap();
        assert_eq!(state.snapshot().await, stored);
        assert_eq!(memory.save_count(), 0);
    }

    #[tokio::test]
    async fn test_initialize_propagates_backend_failure() {
        let memory = Arc::new(MemoryContentService::new());
        memory.set_unavailable(true);
        assert!(AppState::initialize(memory, ChannelConfig::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_open_persists_seed_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChannelConfig::for_data_dir(dir.path());
        {
            let state = AppState::open(config.clone()).await.unwrap();
            assert_eq!(state.snapshot().await.posts.len(), 2);
        }
        assert!(dir.path().join("channel.db").exists());
        let reopened = AppState::open(config).await.unwrap();
        assert_eq!(reopened.snapshot().await, AppData::seed());
    }
}
