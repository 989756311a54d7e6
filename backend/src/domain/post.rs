//! Posts and the Post Store
//!
//! Posts are filed under exactly one leaf tab. The store is a flat list kept
//! newest-first by construction; queries re-sort by id rather than trusting
//! insertion order.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest post id, the last millisecond a `DateTime<Utc>` timestamp can hold
pub const MAX_POST_ID: u64 = i64::MAX as u64;

/// Engagement counters shown under a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub comments: u64,
    pub retweets: u64,
    pub likes: u64,
    /// Display label, e.g. "18K"
    pub views: String,
}

impl Default for PostStats {
    fn default() -> Self {
        Self {
            comments: 0,
            retweets: 0,
            likes: 0,
            views: "0".to_string(),
        }
    }
}

/// A channel post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Creation time in epoch millis, unique within the store
    pub id: u64,
    pub author: String,
    pub handle: String,
    pub created_at: DateTime<Utc>,
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub stats: PostStats,
    pub is_enabled: bool,
    /// Leaf tab this post is filed under. Not checked against the tree.
    pub tab_id: String,
}

/// Caller-supplied part of a new post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub author: String,
    pub handle: String,
    pub content: String,
    pub image_urls: Vec<String>,
    pub video_url: Option<String>,
}

/// Sort order for admin listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// All posts of the channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Prepends a post filed under `tab_id`, stamped with the current time
    pub fn add(&self, tab_id: &str, content: NewPost) -> PostStore {
        self.add_at(tab_id, content, Utc::now())
    }

    /// Id the next post created at `now` would get.
    ///
    /// The creation time in millis, bumped past the largest existing id so two
    /// posts created in the same millisecond stay distinct. `None` once the
    /// bump would pass [`MAX_POST_ID`].
    pub fn next_id(&self, now: DateTime<Utc>) -> Option<u64> {
        let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let next_free = match self.posts.iter().map(|p| p.id).max() {
            Some(max) => max.checked_add(1)?,
            None => 0,
        };
        Some(stamp.max(next_free)).filter(|id| *id <= MAX_POST_ID)
    }

    /// Ids above [`MAX_POST_ID`]
    pub fn out_of_range_ids(&self) -> Vec<u64> {
        self.posts
            .iter()
            .map(|post| post.id)
            .filter(|id| *id > MAX_POST_ID)
            .collect()
    }

    /// Ids carried by more than one post, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<u64> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for post in &self.posts {
            if !seen.insert(post.id) && !dups.contains(&post.id) {
                dups.push(post.id);
            }
        }
        dups
    }

    /// Like [`PostStore::add`] with an explicit clock.
    ///
    /// The id comes from [`PostStore::next_id`]; when no id is left the
    /// store is returned unchanged.
    pub fn add_at(&self, tab_id: &str, content: NewPost, now: DateTime<Utc>) -> PostStore {
        let Some(id) = self.next_id(now) else {
            return self.clone();
        };

        let post = Post {
            id,
            author: content.author,
            handle: content.handle,
            created_at: now,
            content: content.content,
            image_urls: content.image_urls,
            video_url: content.video_url,
            stats: PostStats::default(),
            is_enabled: true,
            tab_id: tab_id.to_string(),
        };

        let mut posts = Vec::with_capacity(self.posts.len() + 1);
        posts.push(post);
        posts.extend(self.posts.iter().cloned());
        PostStore { posts }
    }

    /// Flips `is_enabled` on the post with `id`; unknown ids change nothing
    pub fn toggle(&self, id: u64) -> PostStore {
        let posts = self
            .posts
            .iter()
            .map(|post| {
                if post.id == id {
                    Post {
                        is_enabled: !post.is_enabled,
                        ..post.clone()
                    }
                } else {
                    post.clone()
                }
            })
            .collect();
        PostStore { posts }
    }

    /// Enabled posts filed under one of `leaf_ids`, newest first
    pub fn visible_for(&self, leaf_ids: &BTreeSet<String>) -> Vec<&Post> {
        let mut visible: Vec<&Post> = self
            .posts
            .iter()
            .filter(|post| post.is_enabled && leaf_ids.contains(&post.tab_id))
            .collect();
        visible.sort_by(|a, b| b.id.cmp(&a.id));
        visible
    }

    /// Admin listing: disabled posts included, optionally narrowed to a set of tabs
    pub fn listing(&self, order: SortOrder, tabs: Option<&BTreeSet<String>>) -> Vec<&Post> {
        let mut listed: Vec<&Post> = self
            .posts
            .iter()
            .filter(|post| tabs.map_or(true, |tabs| tabs.contains(&post.tab_id)))
            .collect();
        match order {
            SortOrder::NewestFirst => listed.sort_by(|a, b| b.id.cmp(&a.id)),
            SortOrder::OldestFirst => listed.sort_by_key(|post| post.id),
        }
        listed
    }
}
