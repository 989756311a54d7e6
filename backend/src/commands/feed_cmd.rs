//! Feed Commands
//!
//! The viewer screen: banner, tab bars, breadcrumb and visible posts for a
//! navigation path. The path is re-resolved against the current tree on
//! every read, so a stale selection degrades to its longest valid prefix.

use serde::Serialize;

use crate::domain::{BannerConfig, NavigationState, Post, SubNavBar, TabButton};
use crate::AppState;

/// Everything the viewer renders for one navigation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedView {
    pub banner: BannerConfig,
    pub main_tabs: Vec<TabButton>,
    pub bars: Vec<SubNavBar>,
    /// The part of the requested path that resolved
    pub path: Vec<String>,
    pub breadcrumb: Vec<String>,
    pub posts: Vec<Post>,
}

/// Initial selection: the first root tab
pub async fn default_navigation(state: &AppState) -> NavigationState {
    NavigationState::first_root(&state.data.lock().await.tabs)
}

pub async fn feed(state: &AppState, nav: &NavigationState) -> FeedView {
    let data = state.data.lock().await;
    let resolution = nav.resolve(&data.tabs);
    let path = resolution.effective_path();
    if path.len() < nav.path().len() {
        log::debug!(
            "Navigation path {:?} resolved only to {:?}",
            nav.path(),
            path
        );
    }

    FeedView {
        banner: data.banner.clone(),
        main_tabs: resolution.main_tabs(),
        bars: resolution.bars(),
        path: path.into_iter().map(str::to_string).collect(),
        breadcrumb: resolution
            .breadcrumb()
            .into_iter()
            .map(str::to_string)
            .collect(),
        posts: nav
            .feed(&data.tabs, &data.posts)
            .into_iter()
            .cloned()
            .collect(),
    }
}
