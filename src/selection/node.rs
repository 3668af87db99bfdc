//! Tree node types.
//!
//! Nodes live in the arena owned by [`SelectionTree`](super::SelectionTree)
//! and refer to each other through [`NodeId`] handles. Only the tree mutates
//! them, so the aggregate invariants cannot be bypassed from outside.

/// Handle to a node inside one [`SelectionTree`](super::SelectionTree).
///
/// Handles are only minted by the tree that owns the node and stay valid for
/// the tree's whole lifetime (nodes are never removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0
    }
}

/// The two propagated flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    /// User selection. Groups hold the AND of their children.
    Checked,
    /// Search filter result. Groups hold the OR of their children.
    Visible,
}

/// A selectable item
#[derive(Debug, Clone)]
pub struct LeafNode<T> {
    pub(super) name: String,
    pub(super) item: T,
    pub(super) parent: NodeId,
    pub(super) checked: bool,
    pub(super) visible: bool,
}

impl<T> LeafNode<T> {
    pub(super) fn new(name: String, item: T, parent: NodeId) -> Self {
        Self {
            name,
            item,
            parent,
            checked: false,
            visible: true,
        }
    }

    /// Display name of the wrapped item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host item handle
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Owning group
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

/// One folder level of the browser organization
#[derive(Debug, Clone)]
pub struct GroupNode {
    pub(super) name: String,
    pub(super) parent: Option<NodeId>,
    pub(super) level: usize,
    pub(super) children: Vec<NodeId>,
    pub(super) expanded: bool,
    pub(super) checked: bool,
    pub(super) visible: bool,
}

impl GroupNode {
    pub(super) fn new(name: String, parent: Option<NodeId>, level: usize) -> Self {
        Self {
            name,
            parent,
            level,
            children: Vec::new(),
            expanded: false,
            checked: false,
            visible: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent group, `None` for a top-level group
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Depth in the forest (top-level groups are at level 0)
    pub fn level(&self) -> usize {
        self.level
    }

    /// Children in display order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// True when every child is checked
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// True when at least one child is visible
    pub fn visible(&self) -> bool {
        self.visible
    }
}

/// A node of the selection tree
#[derive(Debug, Clone)]
pub enum Node<T> {
    Leaf(LeafNode<T>),
    Group(GroupNode),
}

impl<T> Node<T> {
    pub fn name(&self) -> &str {
        match self {
            Node::Leaf(leaf) => &leaf.name,
            Node::Group(group) => &group.name,
        }
    }

    pub fn checked(&self) -> bool {
        self.flag(StateField::Checked)
    }

    pub fn visible(&self) -> bool {
        self.flag(StateField::Visible)
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(leaf) => Some(leaf.parent),
            Node::Group(group) => group.parent,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&LeafNode<T>> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Node::Group(group) => Some(group),
            Node::Leaf(_) => None,
        }
    }

    /// Children in display order (always empty for a leaf)
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Leaf(_) => &[],
            Node::Group(group) => &group.children,
        }
    }

    pub fn flag(&self, field: StateField) -> bool {
        let (checked, visible) = match self {
            Node::Leaf(leaf) => (leaf.checked, leaf.visible),
            Node::Group(group) => (group.checked, group.visible),
        };
        match field {
            StateField::Checked => checked,
            StateField::Visible => visible,
        }
    }

    pub(super) fn set_flag(&mut self, field: StateField, value: bool) {
        let slot = match (self, field) {
            (Node::Leaf(leaf), StateField::Checked) => &mut leaf.checked,
            (Node::Leaf(leaf), StateField::Visible) => &mut leaf.visible,
            (Node::Group(group), StateField::Checked) => &mut group.checked,
            (Node::Group(group), StateField::Visible) => &mut group.visible,
        };
        *slot = value;
    }
}
