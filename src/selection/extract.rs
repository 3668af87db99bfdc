//! Read-out of the final selection.

use super::node::{LeafNode, Node};
use super::tree::{SelectionTree, Walk};

/// Lazy iterator over leaves that are both checked and visible.
///
/// Leaves come out depth-first, left to right. Only leaf flags are read;
/// group aggregates are never used as a shortcut.
#[derive(Debug, Clone)]
pub struct CheckedLeaves<'a, T> {
    walk: Walk<'a, T>,
}

impl<'a, T> Iterator for CheckedLeaves<'a, T> {
    type Item = &'a LeafNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.walk.tree();
        loop {
            let id = self.walk.next()?;
            if let Node::Leaf(leaf) = &tree[id] {
                if leaf.checked() && leaf.visible() {
                    return Some(leaf);
                }
            }
        }
    }
}

/// Start a fresh traversal over the checked, visible leaves
pub fn checked_leaves<T>(tree: &SelectionTree<T>) -> CheckedLeaves<'_, T> {
    CheckedLeaves { walk: tree.walk() }
}

/// Item handles of the checked, visible leaves, in extraction order
pub fn checked_items<T>(tree: &SelectionTree<T>) -> impl Iterator<Item = &T> {
    checked_leaves(tree).map(LeafNode::item)
}
