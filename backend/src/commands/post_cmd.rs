//! Commands for Post operations
//!
//! Publishing, enabling/disabling, and the admin post listing.

use std::collections::BTreeSet;

use chrono::Utc;

use super::blob_cmd::{discard_uploads, upload_inline, InlineUpload};
use super::commit;
use crate::domain::{
    is_data_url, DomainError, DomainResult, NewPost, Post, SortOrder, MAX_POST_ID,
};
use crate::AppState;

/// Form input for a new post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub tab_id: String,
    pub content: String,
    /// Remote URLs or inline `data:` payloads
    pub image_urls: Vec<String>,
    pub video_url: Option<String>,
}

/// Publish a post to a leaf tab
///
/// Author comes from the banner title and the handle from config. Inline
/// `data:` images and video are uploaded first and replaced by their URLs;
/// when the post is not saved those uploads are deleted again.
pub async fn add_post(state: &AppState, draft: PostDraft) -> DomainResult<Post> {
    let content = draft.content.trim();
    if content.is_empty() {
        return Err(DomainError::InvalidInput("Post content cannot be empty".to_string()));
    }
    let max_chars = state.config.max_content_chars;
    if content.chars().count() > max_chars {
        return Err(DomainError::InvalidInput(format!(
            "Post content exceeds {} characters",
            max_chars
        )));
    }
    if draft.image_urls.len() > state.config.max_images {
        return Err(DomainError::InvalidInput(format!(
            "At most {} images per post",
            state.config.max_images
        )));
    }

    let mut data = state.data.lock().await;
    if !data.tabs.contains(&draft.tab_id) {
        return Err(DomainError::NotFound(format!("Tab {} not found", draft.tab_id)));
    }
    if !data.tabs.is_leaf(&draft.tab_id) {
        return Err(DomainError::InvalidInput(format!(
            "Tab {} has sub-tabs; posts go to leaf tabs",
            draft.tab_id
        )));
    }
    let now = Utc::now();
    if data.posts.next_id(now).is_none() {
        return Err(DomainError::Conflict(format!(
            "No post id left below {}",
            MAX_POST_ID
        )));
    }

    let mut uploads = Vec::new();
    let media = match upload_media(state, &draft, now.timestamp_millis(), &mut uploads).await {
        Ok(media) => media,
        Err(e) => {
            discard_uploads(state, &uploads).await;
            return Err(e);
        }
    };

    let new_post = NewPost {
        author: data.banner.title.clone(),
        handle: state.config.handle.clone(),
        content: content.to_string(),
        image_urls: media.image_urls,
        video_url: media.video_url,
    };
    let mut next = data.clone();
    next.posts = data.posts.add_at(&draft.tab_id, new_post, now);
    // add_at() prepends
    let post = next
        .posts
        .posts()
        .first()
        .cloned()
        .ok_or_else(|| DomainError::Internal("Post was not stored".to_string()))?;
    if let Err(e) = commit(state, &mut data, next).await {
        discard_uploads(state, &uploads).await;
        return Err(e);
    }

    log::info!("Published post {} to {}", post.id, post.tab_id);
    Ok(post)
}

/// Media URLs of a draft after inline uploads
struct PostMedia {
    image_urls: Vec<String>,
    video_url: Option<String>,
}

async fn upload_media(
    state: &AppState,
    draft: &PostDraft,
    stamp: i64,
    uploads: &mut Vec<InlineUpload>,
) -> DomainResult<PostMedia> {
    let mut image_urls = Vec::with_capacity(draft.image_urls.len());
    for (index, url) in draft.image_urls.iter().enumerate() {
        if is_data_url(url) {
            let stem = format!("post-{}-{}", stamp, index);
            let upload = upload_inline(state, url, "images", &stem).await?;
            image_urls.push(upload.url.clone());
            uploads.push(upload);
        } else {
            image_urls.push(url.clone());
        }
    }

    let video_url = match draft.video_url.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(url) if is_data_url(url) => {
            let stem = format!("post-{}", stamp);
            let upload = upload_inline(state, url, "videos", &stem).await?;
            let url = upload.url.clone();
            uploads.push(upload);
            Some(url)
        }
        Some(_) => draft.video_url.clone(),
    };

    Ok(PostMedia {
        image_urls,
        video_url,
    })
}

/// Flip a post's enabled flag
pub async fn toggle_post(state: &AppState, id: u64) -> DomainResult<Post> {
    let mut data = state.data.lock().await;
    if data.posts.get(id).is_none() {
        return Err(DomainError::NotFound(format!("Post {} not found", id)));
    }

    let mut next = data.clone();
    next.posts = data.posts.toggle(id);
    let post = next
        .posts
        .get(id)
        .cloned()
        .ok_or_else(|| DomainError::Internal(format!("Post {} vanished", id)))?;
    commit(state, &mut data, next).await?;

    log::info!("Post {} enabled={}", id, post.is_enabled);
    Ok(post)
}

/// Admin listing, including disabled posts
///
/// With a tab filter, shows posts filed under that tab or any tab below it.
pub async fn list_posts(
    state: &AppState,
    order: SortOrder,
    tab_id: Option<&str>,
) -> DomainResult<Vec<Post>> {
    let data = state.data.lock().await;
    let filter: Option<BTreeSet<String>> = match tab_id {
        Some(id) => Some(
            data.tabs
                .find_node(id)
                .map(|node| node.leaf_ids())
                .ok_or_else(|| DomainError::NotFound(format!("Tab {} not found", id)))?,
        ),
        None => None,
    };

    Ok(data
        .posts
        .listing(order, filter.as_ref())
        .into_iter()
        .cloned()
        .collect())
}
