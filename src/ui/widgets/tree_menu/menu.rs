//! TreeMenu state management and action handling.
//!
//! The menu owns the selection tree for one session. Every action goes
//! through the tree's own operations, so group aggregates stay consistent;
//! the menu only keeps a flattened, visible-only projection for drawing.

use croptree::config::Preferences;
use croptree::models::ViewId;
use croptree::selection::{checked_items, NodeId, SearchFilter, SelectionTree};

use super::render::{render_help_bar, render_status_bar, render_tree_node};

/// Checkbox state shown for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Selected,
    Unselected,
    /// Some leaves below are checked, not all
    Partial,
}

/// A flattened representation of a tree node for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedNode {
    pub id: NodeId,
    /// Depth level (0 = top-level group)
    pub depth: usize,
    pub label: String,
    pub state: SelectionState,
    pub expanded: bool,
    pub has_children: bool,
    /// Visible leaves in this subtree
    pub leaf_count: usize,
}

/// Tree menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAction {
    Up,
    Down,
    Toggle,
    Expand,
    Collapse,
    SelectAll,
    SelectNone,
    /// Flip every visible leaf
    Invert,
    /// Enter search mode
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    /// Leave search mode, keeping the current filter
    EndSearch,
    ToggleCopyVisibility,
    ToggleCopySectionBox,
    Confirm,
    Quit,
}

/// Interactive checkbox tree of candidate views
pub struct TreeMenu {
    tree: SelectionTree<ViewId>,
    filter: SearchFilter,
    query: String,
    searching: bool,
    prefs: Preferences,
    initial_prefs: Preferences,
    cursor: usize,
    flattened: Vec<FlattenedNode>,
}

impl TreeMenu {
    pub fn new(tree: SelectionTree<ViewId>, filter: SearchFilter, prefs: Preferences) -> Self {
        let mut menu = Self {
            tree,
            filter,
            query: String::new(),
            searching: false,
            prefs,
            initial_prefs: prefs,
            cursor: 0,
            flattened: Vec::new(),
        };
        menu.rebuild_flattened();
        menu
    }

    /// Rebuild the flattened node list
    pub fn rebuild_flattened(&mut self) {
        let mut out = Vec::new();
        for &root in self.tree.roots() {
            flatten(&self.tree, root, 0, &mut out);
        }
        self.flattened = out;

        if self.cursor >= self.flattened.len() {
            self.cursor = self.flattened.len().saturating_sub(1);
        }
    }

    pub fn flattened_nodes(&self) -> &[FlattenedNode] {
        &self.flattened
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn tree(&self) -> &SelectionTree<ViewId> {
        &self.tree
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    /// Whether a preference differs from the one the menu started with
    pub fn preferences_changed(&self) -> bool {
        self.prefs != self.initial_prefs
    }

    /// `stored` with only the preferences toggled in this menu replaced
    pub fn merge_toggled_preferences(&self, mut stored: Preferences) -> Preferences {
        if self.prefs.copy_crop_visibility != self.initial_prefs.copy_crop_visibility {
            stored.copy_crop_visibility = self.prefs.copy_crop_visibility;
        }
        if self.prefs.copy_section_box != self.initial_prefs.copy_section_box {
            stored.copy_section_box = self.prefs.copy_section_box;
        }
        stored
    }

    /// Replace the live query and re-filter
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.filter.apply(&mut self.tree, &self.query);
        self.rebuild_flattened();
    }

    /// Handle a tree action. Returns true when the session should end.
    pub fn handle_action(&mut self, action: TreeAction) -> bool {
        match action {
            TreeAction::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            TreeAction::Down => {
                if self.cursor + 1 < self.flattened.len() {
                    self.cursor += 1;
                }
            }
            TreeAction::Toggle => {
                if let Some(id) = self.current() {
                    self.tree.toggle(id);
                }
            }
            TreeAction::Expand => {
                if let Some(id) = self.current() {
                    if !self.tree[id].is_leaf() {
                        self.tree.set_expanded(id, true);
                    }
                }
            }
            TreeAction::Collapse => self.collapse(),
            TreeAction::SelectAll => self.tree.check_all(),
            TreeAction::SelectNone => self.tree.uncheck_all(),
            TreeAction::Invert => {
                let visible: Vec<NodeId> = self
                    .tree
                    .leaves()
                    .filter(|&id| self.tree[id].visible())
                    .collect();
                for id in visible {
                    self.tree.toggle(id);
                }
            }
            TreeAction::StartSearch => self.searching = true,
            TreeAction::SearchInput(c) => {
                let mut query = std::mem::take(&mut self.query);
                query.push(c);
                self.set_query(query);
            }
            TreeAction::SearchBackspace => {
                let mut query = std::mem::take(&mut self.query);
                query.pop();
                self.set_query(query);
            }
            TreeAction::EndSearch => self.searching = false,
            TreeAction::ToggleCopyVisibility => {
                self.prefs.copy_crop_visibility = !self.prefs.copy_crop_visibility;
            }
            TreeAction::ToggleCopySectionBox => {
                self.prefs.copy_section_box = !self.prefs.copy_section_box;
            }
            TreeAction::Confirm | TreeAction::Quit => return true,
        }
        self.rebuild_flattened();
        false
    }

    fn current(&self) -> Option<NodeId> {
        self.flattened.get(self.cursor).map(|n| n.id)
    }

    /// Collapse the current group, or jump to the parent of a leaf or an
    /// already collapsed group
    fn collapse(&mut self) {
        let Some(id) = self.current() else {
            return;
        };
        let expanded = self.tree[id].as_group().is_some_and(|g| g.expanded());
        if expanded {
            self.tree.set_expanded(id, false);
            return;
        }
        if let Some(parent) = self.tree[id].parent() {
            if let Some(pos) = self.flattened.iter().position(|n| n.id == parent) {
                self.cursor = pos;
            }
        }
    }

    /// Checked, visible views in tree order
    pub fn selected_items(&self) -> Vec<ViewId> {
        checked_items(&self.tree).copied().collect()
    }

    pub fn selected_count(&self) -> usize {
        checked_items(&self.tree).count()
    }

    /// Visible leaves
    pub fn total_count(&self) -> usize {
        self.tree
            .leaves()
            .filter(|&id| self.tree[id].visible())
            .count()
    }

    /// Render the visible rows; `with_cursor` draws the `>` marker
    pub fn render(&self, supports_unicode: bool, with_cursor: bool) -> String {
        let mut out = String::new();
        for (i, node) in self.flattened.iter().enumerate() {
            let active = with_cursor.then_some(i == self.cursor);
            out.push_str(&render_tree_node(node, active, supports_unicode));
            out.push('\n');
        }
        out
    }

    pub fn render_status_bar(&self, supports_unicode: bool) -> String {
        render_status_bar(
            self.selected_count(),
            self.total_count(),
            &self.prefs,
            self.searching.then_some(self.query.as_str()),
            supports_unicode,
        )
    }

    pub fn render_help_bar(&self) -> String {
        render_help_bar(self.searching)
    }

    pub fn into_parts(self) -> (SelectionTree<ViewId>, SearchFilter) {
        (self.tree, self.filter)
    }
}

fn flatten(tree: &SelectionTree<ViewId>, id: NodeId, depth: usize, out: &mut Vec<FlattenedNode>) {
    let node = &tree[id];
    if !node.visible() {
        return;
    }

    let (expanded, children) = match node.as_group() {
        Some(group) => (group.expanded(), group.children()),
        None => (false, &[][..]),
    };
    let (leaf_count, checked) = visible_leaf_counts(tree, id);
    let state = if node.checked() {
        SelectionState::Selected
    } else if checked > 0 {
        SelectionState::Partial
    } else {
        SelectionState::Unselected
    };

    out.push(FlattenedNode {
        id,
        depth,
        label: node.name().to_string(),
        state,
        expanded,
        has_children: !children.is_empty(),
        leaf_count,
    });

    if expanded {
        for &child in children {
            flatten(tree, child, depth + 1, out);
        }
    }
}

/// (visible leaves, checked visible leaves) at or below `id`
fn visible_leaf_counts(tree: &SelectionTree<ViewId>, id: NodeId) -> (usize, usize) {
    tree.walk_from(id)
        .filter_map(|n| tree[n].as_leaf())
        .filter(|leaf| leaf.visible())
        .fold((0, 0), |(total, checked), leaf| {
            (total + 1, checked + usize::from(leaf.checked()))
        })
}
