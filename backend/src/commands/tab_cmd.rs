//! Commands for Tab operations
//!
//! Listing the tab hierarchy, adding tabs, and the post target list.

use serde::Serialize;

use super::{commit, now_millis};
use crate::domain::{slug_id, DomainError, DomainResult, TabNode, TabTree};
use crate::AppState;

/// A leaf tab offered as a post destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostTarget {
    pub id: String,
    /// Labels from the root down, joined with " > "
    pub path_label: String,
}

/// List the whole tab tree
pub async fn list_tabs(state: &AppState) -> TabTree {
    state.data.lock().await.tabs.clone()
}

/// Add a tab under `parent_id`, or as a new root when `None`
pub async fn add_tab(
    state: &AppState,
    parent_id: Option<&str>,
    label: &str,
) -> DomainResult<TabNode> {
    let label = label.trim();
    if label.is_empty() {
        return Err(DomainError::InvalidInput("Tab label cannot be empty".to_string()));
    }

    let mut data = state.data.lock().await;
    if let Some(parent) = parent_id {
        if !data.tabs.contains(parent) {
            return Err(DomainError::NotFound(format!("Tab {} not found", parent)));
        }
    }

    let node = TabNode::new(slug_id(label, now_millis()), label);
    if data.tabs.contains(&node.id) {
        return Err(DomainError::Conflict(format!("Tab id {} already exists", node.id)));
    }

    let mut next = data.clone();
    next.tabs = data.tabs.insert(parent_id, node.clone());
    commit(state, &mut data, next).await?;

    log::info!("Added tab {} under {}", node.id, parent_id.unwrap_or("<root>"));
    Ok(node)
}

/// Every leaf tab with its full label path, in display order
pub async fn post_targets(state: &AppState) -> Vec<PostTarget> {
    let data = state.data.lock().await;
    data.tabs
        .leaves()
        .into_iter()
        .map(|leaf| PostTarget {
            id: leaf.id.clone(),
            path_label: data.tabs.path_labels(&leaf.id).join(" > "),
        })
        .collect()
}
