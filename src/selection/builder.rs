//! Forest construction from flat, path-annotated items.

use std::collections::HashMap;

use super::compare::SortOrder;
use super::node::NodeId;
use super::tree::SelectionTree;

/// Name of the synthetic top-level group that collects items without a path
pub const UNGROUPED_LABEL: &str = "!Not organized";

/// One item to place in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildItem<T> {
    pub item: T,
    /// Display name of the leaf
    pub name: String,
    /// Folder names from the top level down. Empty means ungrouped.
    pub path: Vec<String>,
}

impl<T> BuildItem<T> {
    pub fn new(item: T, name: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            item,
            name: name.into(),
            path,
        }
    }
}

/// Build a sorted forest from flat items.
///
/// Items sharing a path prefix share the group chain for that prefix: a group
/// is identified by its level, parent and name. Items with an empty path land
/// in a single [`UNGROUPED_LABEL`] group. A forest with exactly one top-level
/// group starts with that group expanded.
pub fn build_tree<T>(
    items: impl IntoIterator<Item = BuildItem<T>>,
    order: SortOrder,
) -> SelectionTree<T> {
    let mut tree = SelectionTree::new();
    let mut groups: HashMap<(usize, Option<NodeId>, String), NodeId> = HashMap::new();
    let mut ungrouped = Vec::new();

    for entry in items {
        let BuildItem { item, name, path } = entry;
        if path.is_empty() {
            ungrouped.push((item, name));
            continue;
        }

        let mut parent = None;
        for (level, segment) in path.into_iter().enumerate() {
            let key = (level, parent, segment);
            let group = match groups.get(&key) {
                Some(&group) => group,
                None => {
                    let group = tree.add_group(parent, key.2.clone());
                    groups.insert(key, group);
                    group
                }
            };
            parent = Some(group);
        }

        if let Some(group) = parent {
            tree.add_leaf(group, item, name);
        }
    }

    if !ungrouped.is_empty() {
        let bucket = tree.add_group(None, UNGROUPED_LABEL);
        for (item, name) in ungrouped {
            tree.add_leaf(bucket, item, name);
        }
    }

    tree.sort(order);

    if tree.roots().len() == 1 {
        let only = tree.roots()[0];
        tree.set_expanded(only, true);
    }

    tree
}
