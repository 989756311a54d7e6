//! Channel Document
//!
//! The whole channel (banner, tabs, posts) travels as one document: it is
//! what the backend stores and what backups contain.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::banner::BannerConfig;
use super::error::{DomainError, DomainResult};
use super::post::{Post, PostStats, PostStore, MAX_POST_ID};
use super::tab::{TabNode, TabTree};

const BANNER_KEY: &str = "bannerData";
const POSTS_KEY: &str = "postsData";
const TABS_KEY: &str = "tabsData";

/// Complete channel state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(rename = "bannerData")]
    pub banner: BannerConfig,
    #[serde(rename = "postsData")]
    pub posts: PostStore,
    #[serde(rename = "tabsData")]
    pub tabs: TabTree,
}

impl AppData {
    /// Default channel used when the backend has no document yet
    pub fn seed() -> Self {
        let author = "श्री ओपी चौधरी";
        let seeded_post = |id: u64, content: &str, image: &str, stats: PostStats| Post {
            id,
            author: author.to_string(),
            handle: "@OPChoudhary".to_string(),
            created_at: Utc
                .timestamp_millis_opt(i64::try_from(id).unwrap_or_default())
                .single()
                .unwrap_or_default(),
            content: content.to_string(),
            image_urls: vec![image.to_string()],
            video_url: None,
            stats,
            is_enabled: true,
            tab_id: "vitt".to_string(),
        };

        let posts = PostStore::new(vec![
            seeded_post(
                1_709_200_000_000,
                "आज विधानसभा में छत्तीसगढ़ का वित्तीय वर्ष 2024-25 का बजट पेश किया। यह बजट 'विकसित भारत' के संकल्प में 'विकसित छत्तीसगढ़' के योगदान को सुनिश्चित करने वाला बजट है।",
                "https://picsum.photos/seed/budget1/600/400",
                PostStats { comments: 15, retweets: 42, likes: 210, views: "18K".to_string() },
            ),
            seeded_post(
                1_709_100_000_000,
                "हमारी सरकार 'ज्ञान' (गरीब, युवा, अन्नदाता, नारी) पर केंद्रित है। यह बजट राज्य के किसानों को सशक्त बनाएगा और युवाओं के लिए नए अवसर पैदा करेगा। #CGBudget2024",
                "https://picsum.photos/seed/farmer/600/400",
                PostStats { comments: 22, retweets: 58, likes: 305, views: "25K".to_string() },
            ),
        ]);

        let tabs = TabTree::new(vec![
            TabNode::with_children(
                "rajya",
                "राज्य",
                vec![
                    TabNode::new("vitt", "वित्त"),
                    TabNode::with_children(
                        "yojanaye",
                        "योजनाएं",
                        vec![
                            TabNode::new("pmay", "प्रधानमंत्री आवास योजना-ग्रामीण"),
                            TabNode::new("mahatari", "महतारी वंदन योजना"),
                        ],
                    ),
                    TabNode::new("vyapar", "व्यापार कर / वाणिज्य कर"),
                    TabNode::new("awas", "आवास और पर्यावरण योजना"),
                    TabNode::new("arth", "अर्थशास्त्र एवं सांख्यिकी"),
                ],
            ),
            TabNode::with_children(
                "raigarh",
                "रायगढ़",
                vec![
                    TabNode::new("vikas", "विकास कार्य"),
                    TabNode::new("bhent", "भेंट/समारोह"),
                ],
            ),
            TabNode::with_children(
                "reforms",
                "रिफॉर्म्स",
                vec![
                    TabNode::new("scr", "SCR (स्टेट कैपिटल रीजन)"),
                    TabNode::new("registry", "रजिस्ट्री - स्मार्ट पंजीयन"),
                ],
            ),
            TabNode::new("vision", "विज़न"),
        ]);

        Self {
            banner: BannerConfig {
                banner_image_ref: "https://picsum.photos/seed/channel-banner/1200/400".to_string(),
                profile_image_ref: "https://picsum.photos/seed/channel-profile/200/200".to_string(),
                title: "श्री ओपी चौधरी के काम".to_string(),
                follower_count_label: "1.2M followers".to_string(),
            },
            posts,
            tabs,
        }
    }

    /// Serialises the backup document: exactly `bannerData`, `postsData`, `tabsData`
    pub fn export_json(&self) -> DomainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a backup document.
    ///
    /// All three keys must be present, `postsData` and `tabsData` must be
    /// arrays, tab ids and post ids must be unique, and post ids must not
    /// exceed [`MAX_POST_ID`]. Anything else is rejected as an invalid format;
    /// extra top-level keys are ignored.
    pub fn import_json(json: &str) -> DomainResult<AppData> {
        let value: Value = serde_json::from_str(json).map_err(DomainError::invalid_format)?;
        let object = value
            .as_object()
            .ok_or_else(|| DomainError::invalid_format("expected a JSON object"))?;

        for key in [BANNER_KEY, POSTS_KEY, TABS_KEY] {
            if !object.contains_key(key) {
                return Err(DomainError::invalid_format(format!("missing `{}`", key)));
            }
        }
        for key in [POSTS_KEY, TABS_KEY] {
            if !object[key].is_array() {
                return Err(DomainError::invalid_format(format!("`{}` must be an array", key)));
            }
        }

        let data: AppData = serde_json::from_value(value).map_err(DomainError::invalid_format)?;

        let dups = data.tabs.duplicate_ids();
        if !dups.is_empty() {
            return Err(DomainError::invalid_format(format!(
                "duplicate tab ids: {}",
                dups.join(", ")
            )));
        }

        let dups = data.posts.duplicate_ids();
        if !dups.is_empty() {
            return Err(DomainError::invalid_format(format!(
                "duplicate post ids: {}",
                join_ids(&dups)
            )));
        }
        let too_large = data.posts.out_of_range_ids();
        if !too_large.is_empty() {
            return Err(DomainError::invalid_format(format!(
                "post ids above {}: {}",
                MAX_POST_ID,
                join_ids(&too_large)
            )));
        }
        Ok(data)
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter().map(u64::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::NewPost;

    #[test]
    fn test_seed_shape() {
        let data = AppData::seed();
        assert_eq!(data.tabs.roots().len(), 4);
        assert!(data.tabs.is_leaf("pmay"));
        assert!(data.tabs.duplicate_ids().is_empty());
        assert_eq!(data.posts.len(), 2);
        assert!(data.posts.posts().iter().all(|p| data.tabs.is_leaf(&p.tab_id)));
    }

    #[test]
    fn test_export_has_exactly_three_keys() {
        let json = AppData::seed().export_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let mut keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["bannerData", "postsData", "tabsData"]);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut data = AppData::seed();
        data.tabs = data.tabs.insert(Some("vision"), TabNode::new("vision-2030", "2030"));
        data.posts = data
            .posts
            .add(
                "vision-2030",
                NewPost {
                    content: "with video".to_string(),
                    video_url: Some("https://cdn/v.mp4".to_string()),
                    ..Default::default()
                },
            )
            .toggle(1_709_100_000_000);

        let restored = AppData::import_json(&data.export_json().unwrap()).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_import_rejects_missing_key() {
        let err = AppData::import_json(r#"{"bannerData":{},"postsData":[]}"#).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(ref msg) if msg.contains("tabsData")));
    }

    #[test]
    fn test_import_rejects_non_array() {
        let json = r#"{"bannerData":{"bannerUrl":"","profileUrl":"","title":"","followers":""},"postsData":{},"tabsData":[]}"#;
        let err = AppData::import_json(json).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(ref msg) if msg.contains("postsData")));
    }

    #[test]
    fn test_import_rejects_garbage_and_bad_shapes() {
        assert!(AppData::import_json("not json").is_err());
        assert!(AppData::import_json("[]").is_err());
        let bad_banner = r#"{"bannerData":5,"postsData":[],"tabsData":[]}"#;
        assert!(matches!(
            AppData::import_json(bad_banner),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_import_rejects_duplicate_tab_ids() {
        let json = r#"{
            "bannerData":{"bannerUrl":"","profileUrl":"","title":"","followers":""},
            "postsData":[],
            "tabsData":[{"id":"a","label":"A","children":[{"id":"a","label":"inner"}]}]
        }"#;
        let err = AppData::import_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate tab ids: a"));
    }

    #[test]
    fn test_import_rejects_duplicate_post_ids() {
        let seed = AppData::seed();
        let mut posts = seed.posts.posts().to_vec();
        posts.push(posts[0].clone());
        let data = AppData {
            posts: PostStore::new(posts),
            ..seed.clone()
        };

        let err = AppData::import_json(&data.export_json().unwrap()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(err
            .to_string()
            .contains(&format!("duplicate post ids: {}", seed.posts.posts()[0].id)));
    }

    #[test]
    fn test_import_rejects_post_id_past_timestamp_range() {
        let seed = AppData::seed();
        let mut posts = seed.posts.posts().to_vec();
        posts[0].id = u64::MAX;
        let data = AppData {
            posts: PostStore::new(posts),
            ..seed
        };

        let err = AppData::import_json(&data.export_json().unwrap()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(err.to_string().contains("18446744073709551615"));
    }

    #[test]
    fn test_import_ignores_extra_keys() {
        let json = r#"{
            "bannerData":{"bannerUrl":"b","profileUrl":"p","title":"T","followers":"1"},
            "postsData":[],
            "tabsData":[{"id":"a","label":"A"}],
            "exportedBy":"someone"
        }"#;
        let data = AppData::import_json(json).unwrap();
        assert_eq!(data.banner.title, "T");
        assert!(data.tabs.is_leaf("a"));
    }
}
