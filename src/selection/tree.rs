//! Arena-backed selection tree with checked/visible propagation.
//!
//! Writes flow two ways:
//! - top-down: writing a group cascades the value to every descendant
//! - bottom-up: every write then asks the parent to recompute its aggregate,
//!   which climbs one level at a time and stops at the first unchanged group
//!
//! Both directions finish before the call returns, so callers never observe a
//! half-propagated tree.

use std::mem;
use std::ops::Index;

use super::compare::SortOrder;
use super::node::{GroupNode, LeafNode, Node, NodeId, StateField};

/// Owns every node of one forest
#[derive(Debug, Clone)]
pub struct SelectionTree<T> {
    nodes: Vec<Node<T>>,
    roots: Vec<NodeId>,
}

impl<T> Default for SelectionTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for SelectionTree<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.idx()]
    }
}

impl<T> SelectionTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Top-level groups in display order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// True when the forest has no groups
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes (groups and leaves)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.idx())
    }

    /// Create a group under `parent`, or a new top-level group for `None`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is a leaf.
    pub fn add_group(&mut self, parent: Option<NodeId>, name: impl Into<String>) -> NodeId {
        let level = parent.map_or(0, |p| self.group(p).level + 1);
        let id = self.push(Node::Group(GroupNode::new(name.into(), parent, level)));

        match parent {
            Some(p) => self.attach(p, id),
            None => self.roots.push(id),
        }
        id
    }

    /// Create a leaf wrapping `item` under the group `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is a leaf.
    pub fn add_leaf(&mut self, parent: NodeId, item: T, name: impl Into<String>) -> NodeId {
        // Validate before allocating so a bad parent leaves no orphan behind.
        let _ = self.group(parent);
        let id = self.push(Node::Leaf(LeafNode::new(name.into(), item, parent)));
        self.attach(parent, id);
        id
    }

    /// Set the checked flag, cascading down from groups and recomputing every
    /// ancestor.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        self.write(id, StateField::Checked, checked);
    }

    /// Set the visible flag.
    ///
    /// Leaves are the normal target (the search filter writes them). Writing a
    /// group cascades to its descendants so it keeps holding the OR of its
    /// children.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.write(id, StateField::Visible, visible);
    }

    /// Flip the checked flag of a leaf or a whole group
    pub fn toggle(&mut self, id: NodeId) {
        let checked = self[id].checked();
        self.set_checked(id, !checked);
    }

    /// Check every node in the forest
    pub fn check_all(&mut self) {
        self.set_all(true);
    }

    /// Uncheck every node in the forest
    pub fn uncheck_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, checked: bool) {
        for idx in 0..self.roots.len() {
            let root = self.roots[idx];
            self.set_checked(root, checked);
        }
    }

    /// Expand or collapse a group. Leaves have nothing to expand.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if let Node::Group(group) = &mut self.nodes[id.idx()] {
            group.expanded = expanded;
        }
    }

    /// Expand every group on the path from the root down to `id`
    pub fn expand_parents(&mut self, id: NodeId) {
        let mut parent = self[id].parent();
        while let Some(p) = parent {
            let group = self.group_mut(p);
            group.expanded = true;
            parent = group.parent;
        }
    }

    /// Expand or collapse every group
    pub fn set_all_expanded(&mut self, expanded: bool) {
        for node in &mut self.nodes {
            if let Node::Group(group) = node {
                group.expanded = expanded;
            }
        }
    }

    /// Sort every group's children, deepest first, then the top-level list.
    ///
    /// The sort is stable so equal names keep their insertion order and
    /// sorting twice in the same direction changes nothing. Sub-groups come
    /// before leaves when a group holds both.
    pub fn sort(&mut self, order: SortOrder) {
        for idx in 0..self.roots.len() {
            let root = self.roots[idx];
            self.sort_group(root, order);
        }

        let mut roots = mem::take(&mut self.roots);
        sort_ids(&self.nodes, &mut roots, order);
        self.roots = roots;
    }

    fn sort_group(&mut self, id: NodeId, order: SortOrder) {
        let mut children = mem::take(&mut self.group_mut(id).children);

        for &child in &children {
            if !self[child].is_leaf() {
                self.sort_group(child, order);
            }
        }
        sort_ids(&self.nodes, &mut children, order);

        self.group_mut(id).children = children;
    }

    /// Depth-first, pre-order walk over every node of the forest
    pub fn walk(&self) -> Walk<'_, T> {
        Walk::new(self, &self.roots)
    }

    /// Depth-first, pre-order walk over `id` and everything below it
    pub fn walk_from(&self, id: NodeId) -> Walk<'_, T> {
        Walk::new(self, &[id])
    }

    /// All leaves of the forest in display order
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.walk().filter(|&id| self[id].is_leaf())
    }

    /// Number of leaves at or below `id`
    pub fn leaf_count(&self, id: NodeId) -> usize {
        self.walk_from(id).filter(|&n| self[n].is_leaf()).count()
    }

    /// Number of checked leaves at or below `id`
    pub fn checked_leaf_count(&self, id: NodeId) -> usize {
        self.walk_from(id)
            .filter(|&n| self[n].is_leaf() && self[n].checked())
            .count()
    }

    fn push(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.group_mut(parent).children.push(child);
        // A new child can flip either aggregate.
        self.on_child_state_changed(parent, StateField::Checked);
        self.on_child_state_changed(parent, StateField::Visible);
    }

    fn write(&mut self, id: NodeId, field: StateField, value: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.idx()];
            node.set_flag(field, value);
            if let Node::Group(group) = node {
                stack.extend(group.children.iter().copied());
            }
        }

        if let Some(parent) = self[id].parent() {
            self.on_child_state_changed(parent, field);
        }
    }

    /// Recompute `field` on `group` and keep climbing while the value changes
    fn on_child_state_changed(&mut self, group: NodeId, field: StateField) {
        let mut current = group;
        loop {
            let aggregate = self.aggregate(current, field);
            let node = &mut self.nodes[current.idx()];
            if node.flag(field) == aggregate {
                return;
            }
            node.set_flag(field, aggregate);

            match node.parent() {
                Some(parent) => current = parent,
                None => return,
            }
        }
    }

    fn aggregate(&self, group: NodeId, field: StateField) -> bool {
        let mut children = self.group(group).children.iter();
        match field {
            StateField::Checked => children.all(|&c| self[c].checked()),
            StateField::Visible => children.any(|&c| self[c].visible()),
        }
    }

    fn group(&self, id: NodeId) -> &GroupNode {
        match &self.nodes[id.idx()] {
            Node::Group(group) => group,
            Node::Leaf(leaf) => panic!("node '{}' is a leaf, not a group", leaf.name),
        }
    }

    fn group_mut(&mut self, id: NodeId) -> &mut GroupNode {
        match &mut self.nodes[id.idx()] {
            Node::Group(group) => group,
            Node::Leaf(leaf) => panic!("node '{}' is a leaf, not a group", leaf.name),
        }
    }
}

fn sort_ids<T>(nodes: &[Node<T>], ids: &mut [NodeId], order: SortOrder) {
    ids.sort_by(|&a, &b| {
        let (a, b) = (&nodes[a.idx()], &nodes[b.idx()]);
        a.is_leaf()
            .cmp(&b.is_leaf())
            .then_with(|| order.compare(a.name(), b.name()))
    });
}

/// Pre-order iterator over node handles
#[derive(Debug, Clone)]
pub struct Walk<'a, T> {
    tree: &'a SelectionTree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Walk<'a, T> {
    fn new(tree: &'a SelectionTree<T>, start: &[NodeId]) -> Self {
        Self {
            tree,
            stack: start.iter().rev().copied().collect(),
        }
    }

    pub fn tree(&self) -> &'a SelectionTree<T> {
        self.tree
    }
}

impl<T> Iterator for Walk<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree[id].children().iter().rev().copied());
        Some(id)
    }
}
