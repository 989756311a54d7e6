//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! Everything here is pure: operations take the current value and return a
//! new one, and never fail on well-typed input.

mod app_data;
mod banner;
mod error;
mod navigation;
mod post;
mod tab;

pub use app_data::AppData;
pub use banner::{is_data_url, BannerConfig, BannerImage};
pub use error::{DomainError, DomainResult};
pub use navigation::{NavigationState, Resolution, SubNavBar, TabButton};
pub use post::{NewPost, Post, PostStats, PostStore, SortOrder, MAX_POST_ID};
pub use tab::{slug_id, TabNode, TabTree};
