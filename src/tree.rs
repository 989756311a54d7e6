//! Tree Utilities
//!
//! Helper functions for tree rendering.

use channel_lib::domain::{TabNode, TabTree};

/// Flatten the tab tree with a recursive DFS
/// Returns (node, depth) pairs in display order
pub fn flatten_tree(tree: &TabTree) -> Vec<(&TabNode, usize)> {
    fn collect<'t>(node: &'t TabNode, depth: usize, result: &mut Vec<(&'t TabNode, usize)>) {
        result.push((node, depth));
        for child in &node.children {
            collect(child, depth + 1, result);
        }
    }

    let mut result = Vec::new();
    for root in tree.roots() {
        collect(root, 0, &mut result);
    }
    result
}
