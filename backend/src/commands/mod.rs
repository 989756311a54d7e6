//! Commands Layer
//!
//! Admin and viewer operations that bridge the presentation surface to the
//! state container. Mutations follow one pattern: lock the state, compute the
//! next value with a pure domain operation, persist it, and only then swap it
//! in. A failed save leaves the in-memory state untouched.

mod backup_cmd;
mod banner_cmd;
mod blob_cmd;
mod feed_cmd;
mod post_cmd;
mod tab_cmd;

pub use backup_cmd::*;
pub use banner_cmd::*;
pub use blob_cmd::*;
pub use feed_cmd::*;
pub use post_cmd::*;
pub use tab_cmd::*;

use chrono::Utc;
use tokio::sync::MutexGuard;

use crate::domain::{AppData, DomainResult};
use crate::AppState;

/// Persist `next`, then make it the current state
async fn commit(
    state: &AppState,
    current: &mut MutexGuard<'_, AppData>,
    next: AppData,
) -> DomainResult<()> {
    if let Err(e) = state.service.save_state(&next).await {
        log::error!("Save failed, keeping previous state: {}", e);
        return Err(e);
    }
    **current = next;
    Ok(())
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::config::ChannelConfig;
    use crate::domain::AppData;
    use crate::repository::MemoryContentService;
    use crate::AppState;

    /// Seeded state over an in-memory backend
    pub async fn seeded_state() -> (AppState, Arc<MemoryContentService>) {
        let memory = Arc::new(MemoryContentService::with_document(AppData::seed()));
        let state = AppState::initialize(memory.clone(), ChannelConfig::default())
            .await
            .unwrap();
        (state, memory)
    }
}
