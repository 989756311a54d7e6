//! Navigation State
//!
//! The viewer's current selection is a path of tab ids from a root tab down
//! to the deepest selected tab. A path is only ever trusted after resolving it
//! against the current tree: resolution walks the path level by level and
//! stops at the first id that is not a child of the previous match.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::post::{Post, PostStore};
use super::tab::{TabNode, TabTree};

/// Selected path through the tab tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationState {
    path: Vec<String>,
}

impl NavigationState {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Selection the viewer opens with: the first root tab, if any
    pub fn first_root(tree: &TabTree) -> Self {
        Self {
            path: tree.roots().first().map(|root| root.id.clone()).into_iter().collect(),
        }
    }

    /// Raw path as given, possibly with a stale suffix
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Resolves the path against `tree`
    pub fn resolve<'t>(&self, tree: &'t TabTree) -> Resolution<'t> {
        let mut trail: Vec<&'t TabNode> = Vec::with_capacity(self.path.len());
        for segment in &self.path {
            let next = match trail.last().copied() {
                None => tree.root(segment),
                Some(parent) => parent.child(segment),
            };
            match next {
                Some(node) => trail.push(node),
                None => break,
            }
        }
        Resolution { roots: tree, trail }
    }

    /// Selects a top-level tab, discarding any deeper selection.
    ///
    /// Returns `false` and leaves the state untouched if `id` is not a root.
    pub fn select_root(&mut self, tree: &TabTree, id: &str) -> bool {
        if tree.root(id).is_none() {
            return false;
        }
        self.path = vec![id.to_string()];
        true
    }

    /// Handles a click in the sub-navigation bar at `depth`.
    ///
    /// The bar at depth `i` lists the children of the tab resolved at
    /// position `i`; choosing one keeps the first `i + 1` segments and
    /// appends the chosen id.
    pub fn select_in_bar(&mut self, tree: &TabTree, depth: usize, id: &str) -> bool {
        let resolution = self.resolve(tree);
        let Some(owner) = resolution.trail().get(depth) else {
            return false;
        };
        if owner.child(id).is_none() {
            return false;
        }
        let mut path: Vec<String> = resolution
            .effective_path()
            .into_iter()
            .take(depth + 1)
            .map(str::to_string)
            .collect();
        path.push(id.to_string());
        self.path = path;
        true
    }

    /// Posts visible under the current selection, newest first
    pub fn feed<'p>(&self, tree: &TabTree, posts: &'p PostStore) -> Vec<&'p Post> {
        posts.visible_for(&self.resolve(tree).visible_leaf_ids())
    }
}

/// A row of tab buttons below the main tab bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubNavBar {
    /// Position of the owning tab in the resolved path
    pub depth: usize,
    pub parent_id: String,
    pub tabs: Vec<TabButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabButton {
    pub id: String,
    pub label: String,
    pub active: bool,
}

/// Result of resolving a [`NavigationState`] against a tree
#[derive(Debug, Clone)]
pub struct Resolution<'t> {
    roots: &'t TabTree,
    trail: Vec<&'t TabNode>,
}

impl<'t> Resolution<'t> {
    /// Matched tabs, root first
    pub fn trail(&self) -> &[&'t TabNode] {
        &self.trail
    }

    /// Deepest matched tab; `None` when not even the first segment resolved
    pub fn focus(&self) -> Option<&'t TabNode> {
        self.trail.last().copied()
    }

    /// The part of the path that actually resolved
    pub fn effective_path(&self) -> Vec<&'t str> {
        self.trail.iter().map(|node| node.id.as_str()).collect()
    }

    /// Labels of the matched tabs, root first
    pub fn breadcrumb(&self) -> Vec<&'t str> {
        self.trail.iter().map(|node| node.label.as_str()).collect()
    }

    /// Leaves under the focus tab; empty without a focus
    pub fn visible_leaf_ids(&self) -> BTreeSet<String> {
        self.focus().map(TabNode::leaf_ids).unwrap_or_default()
    }

    /// The main tab bar: every root, with the selected one active
    pub fn main_tabs(&self) -> Vec<TabButton> {
        let active = self.trail.first().map(|node| node.id.as_str());
        self.roots
            .roots()
            .iter()
            .map(|root| TabButton {
                id: root.id.clone(),
                label: root.label.clone(),
                active: Some(root.id.as_str()) == active,
            })
            .collect()
    }

    /// One bar per matched tab that has children; a leaf focus ends the chain
    pub fn bars(&self) -> Vec<SubNavBar> {
        self.trail
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_leaf())
            .map(|(depth, node)| {
                let active = self.trail.get(depth + 1).map(|next| next.id.as_str());
                SubNavBar {
                    depth,
                    parent_id: node.id.clone(),
                    tabs: node
                        .children
                        .iter()
                        .map(|child| TabButton {
                            id: child.id.clone(),
                            label: child.label.clone(),
                            active: Some(child.id.as_str()) == active,
                        })
                        .collect(),
                }
            })
            .collect()
    }

    /// Whether the focus is a leaf, i.e. no further narrowing is possible
    pub fn is_terminal(&self) -> bool {
        self.focus().is_some_and(TabNode::is_leaf)
    }
}
