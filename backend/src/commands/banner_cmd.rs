//! Banner Commands

use super::blob_cmd::{discard_uploads, upload_inline, InlineUpload};
use super::{commit, now_millis};
use crate::domain::{BannerConfig, DomainError, DomainResult};
use crate::AppState;

pub async fn get_banner(state: &AppState) -> BannerConfig {
    state.data.lock().await.banner.clone()
}

/// Replace the banner; inline `data:` images are uploaded first
///
/// Images uploaded for a change that then fails to save are deleted again.
pub async fn update_banner(state: &AppState, banner: BannerConfig) -> DomainResult<BannerConfig> {
    if banner.title.trim().is_empty() {
        return Err(DomainError::InvalidInput("Channel title cannot be empty".to_string()));
    }

    let mut data = state.data.lock().await;
    let mut banner = banner;
    let mut uploads = Vec::new();
    if let Err(e) = upload_banner_images(state, &mut banner, &mut uploads).await {
        discard_uploads(state, &uploads).await;
        return Err(e);
    }

    let mut next = data.clone();
    next.banner = banner.clone();
    if let Err(e) = commit(state, &mut data, next).await {
        discard_uploads(state, &uploads).await;
        return Err(e);
    }

    log::info!("Banner updated: {}", banner.title);
    Ok(banner)
}

async fn upload_banner_images(
    state: &AppState,
    banner: &mut BannerConfig,
    uploads: &mut Vec<InlineUpload>,
) -> DomainResult<()> {
    let stamp = now_millis();
    for which in banner.pending_uploads() {
        let stem = format!("{}-{}", which.blob_stem(), stamp);
        let upload = upload_inline(state, banner.image_ref(which), "images", &stem).await?;
        banner.set_image_ref(which, upload.url.clone());
        uploads.push(upload);
    }
    Ok(())
}
