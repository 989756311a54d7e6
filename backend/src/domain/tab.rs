//! Tab Tree
//!
//! The navigation hierarchy of the channel. Tabs nest to any depth; only
//! leaf tabs carry posts, so selecting an inner tab shows everything filed
//! under the leaves below it.
//!
//! The tree is persistent: `insert` copies the spine from the root to the
//! parent and shares every other subtree with the previous version.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("slug pattern is valid"));

/// A tab in the navigation hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabNode {
    /// Unique across the whole tree
    pub id: String,
    /// Display label
    pub label: String,
    /// Display order is vector order
    #[serde(default)]
    pub children: Vec<Arc<TabNode>>,
}

impl TabNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<TabNode>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Ids of every leaf at or below this node.
    ///
    /// A leaf yields just its own id.
    pub fn leaf_ids(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_leaf_ids(&mut out);
        out
    }

    fn collect_leaf_ids(&self, out: &mut BTreeSet<String>) {
        if self.is_leaf() {
            out.insert(self.id.clone());
            return;
        }
        for child in &self.children {
            child.collect_leaf_ids(out);
        }
    }

    /// Depth-first search of this subtree
    pub fn find(&self, id: &str) -> Option<&TabNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Child with the given id, one level down only
    pub fn child(&self, id: &str) -> Option<&TabNode> {
        self.children
            .iter()
            .map(Arc::as_ref)
            .find(|child| child.id == id)
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.id);
        for child in &self.children {
            child.collect_ids(out);
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a TabNode>) {
        if self.is_leaf() {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }
}

/// Ordered root tabs of the channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabTree {
    roots: Vec<Arc<TabNode>>,
}

impl TabTree {
    pub fn new(roots: Vec<TabNode>) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn roots(&self) -> &[Arc<TabNode>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Root tab with the given id
    pub fn root(&self, id: &str) -> Option<&TabNode> {
        self.roots
            .iter()
            .map(Arc::as_ref)
            .find(|root| root.id == id)
    }

    /// Depth-first lookup across all roots, first match wins
    pub fn find_node(&self, id: &str) -> Option<&TabNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// Whether `id` names an existing leaf
    pub fn is_leaf(&self, id: &str) -> bool {
        self.find_node(id).is_some_and(TabNode::is_leaf)
    }

    /// Labels from the root down to the tab `id`.
    ///
    /// Best effort: an unknown id has no ancestor chain and yields an empty
    /// list rather than an error.
    pub fn path_labels(&self, id: &str) -> Vec<String> {
        fn walk(nodes: &[Arc<TabNode>], id: &str, trail: &mut Vec<String>) -> bool {
            for node in nodes {
                trail.push(node.label.clone());
                if node.id == id || walk(&node.children, id, trail) {
                    return true;
                }
                trail.pop();
            }
            false
        }

        let mut trail = Vec::new();
        walk(&self.roots, id, &mut trail);
        trail
    }

    /// All leaves in display order
    pub fn leaves(&self) -> Vec<&TabNode> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.collect_leaves(&mut out);
        }
        out
    }

    /// Every id in the tree, depth first
    pub fn ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.collect_ids(&mut out);
        }
        out
    }

    /// Ids that occur more than once, in first-repeat order
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for id in self.ids() {
            if !seen.insert(id) && !dups.iter().any(|d: &String| d == id) {
                dups.push(id.to_string());
            }
        }
        dups
    }

    /// Returns a tree with `node` appended to `parent_id`'s children, or as
    /// the last root when `parent_id` is `None`.
    ///
    /// Only the nodes from the root to the parent are copied. The result is
    /// the unchanged tree when the parent does not exist or when an id inside
    /// `node` is already taken.
    pub fn insert(&self, parent_id: Option<&str>, node: TabNode) -> TabTree {
        let mut incoming = Vec::new();
        node.collect_ids(&mut incoming);
        let mut unique = HashSet::new();
        if incoming
            .iter()
            .any(|id| self.contains(id) || !unique.insert(*id))
        {
            return self.clone();
        }

        let node = Arc::new(node);
        let mut roots = self.roots.clone();
        match parent_id {
            None => {
                roots.push(node);
                TabTree { roots }
            }
            Some(parent_id) => {
                for slot in roots.iter_mut() {
                    if let Some(updated) = append_child(slot, parent_id, &node) {
                        *slot = updated;
                        return TabTree { roots };
                    }
                }
                self.clone()
            }
        }
    }
}

/// Rebuilds the spine down to `parent_id`, sharing untouched siblings
fn append_child(
    current: &Arc<TabNode>,
    parent_id: &str,
    child: &Arc<TabNode>,
) -> Option<Arc<TabNode>> {
    if current.id == parent_id {
        let mut children = current.children.clone();
        children.push(Arc::clone(child));
        return Some(Arc::new(TabNode {
            id: current.id.clone(),
            label: current.label.clone(),
            children,
        }));
    }

    for (idx, existing) in current.children.iter().enumerate() {
        if let Some(updated) = append_child(existing, parent_id, child) {
            let mut children = current.children.clone();
            children[idx] = updated;
            return Some(Arc::new(TabNode {
                id: current.id.clone(),
                label: current.label.clone(),
                children,
            }));
        }
    }
    None
}

/// Tab id derived from a label: lower-cased, runs of anything outside
/// `[a-z0-9]` collapsed to `-`, then suffixed with the creation time.
pub fn slug_id(label: &str, now_millis: i64) -> String {
    let lowered = label.trim().to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "-");
    format!("{}-{}", slug, now_millis)
}
