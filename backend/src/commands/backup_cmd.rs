//! Backup Commands
//!
//! JSON export and all-or-nothing import of the whole channel document.

use serde::Serialize;

use super::commit;
use crate::domain::{AppData, DomainResult};
use crate::AppState;

/// Counts of what an import replaced the channel with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub tabs: usize,
    pub posts: usize,
}

/// Pretty JSON of the current document
pub async fn export_data(state: &AppState) -> DomainResult<String> {
    state.data.lock().await.export_json()
}

/// Replace the whole document with `json`
///
/// Nothing changes unless the input validates and the save succeeds.
pub async fn import_data(state: &AppState, json: &str) -> DomainResult<ImportSummary> {
    let imported = AppData::import_json(json)?;
    let summary = ImportSummary {
        tabs: imported.tabs.ids().len(),
        posts: imported.posts.len(),
    };

    let mut data = state.data.lock().await;
    commit(state, &mut data, imported).await?;

    log::info!("Imported {} tabs and {} posts", summary.tabs, summary.posts);
    Ok(summary)
}
