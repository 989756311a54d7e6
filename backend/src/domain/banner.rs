//! Channel Banner
//!
//! Branding shown above the tab bar.

use serde::{Deserialize, Serialize};

/// Channel branding record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(rename = "bannerUrl")]
    pub banner_image_ref: String,
    #[serde(rename = "profileUrl")]
    pub profile_image_ref: String,
    pub title: String,
    /// Free-form label, e.g. "1.2M followers"
    #[serde(rename = "followers")]
    pub follower_count_label: String,
}

impl BannerConfig {
    /// Image references still holding inline `data:` payloads that need uploading
    pub fn pending_uploads(&self) -> Vec<BannerImage> {
        let mut pending = Vec::new();
        if is_data_url(&self.banner_image_ref) {
            pending.push(BannerImage::Banner);
        }
        if is_data_url(&self.profile_image_ref) {
            pending.push(BannerImage::Profile);
        }
        pending
    }

    pub fn image_ref(&self, which: BannerImage) -> &str {
        match which {
            BannerImage::Banner => &self.banner_image_ref,
            BannerImage::Profile => &self.profile_image_ref,
        }
    }

    pub fn set_image_ref(&mut self, which: BannerImage, url: String) {
        match which {
            BannerImage::Banner => self.banner_image_ref = url,
            BannerImage::Profile => self.profile_image_ref = url,
        }
    }
}

/// The two images of a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerImage {
    Banner,
    Profile,
}

impl BannerImage {
    /// Blob name prefix used when uploading
    pub fn blob_stem(self) -> &'static str {
        match self {
            BannerImage::Banner => "banner",
            BannerImage::Profile => "profile",
        }
    }
}

pub fn is_data_url(value: &str) -> bool {
    value.starts_with("data:")
}
