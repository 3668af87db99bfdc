//! Checkbox selection tree
//!
//! A forest of folder groups built from flat, path-annotated items. Groups
//! derive their checked state (AND of children) and visible state (OR of
//! children) and push checked writes down to every descendant.
//!
//! # Module Structure
//!
//! - `compare` - natural name ordering and sort direction
//! - `node` - node handles and the leaf/group variants
//! - `tree` - the arena and all state propagation
//! - `builder` - forest construction from flat items
//! - `extract` - checked, visible leaves in display order
//! - `filter` - live search that drives leaf visibility

mod builder;
mod compare;
mod extract;
mod filter;
mod node;
mod tree;

pub use builder::{build_tree, BuildItem, UNGROUPED_LABEL};
pub use compare::{ordinal_cmp, SortOrder};
pub use extract::{checked_items, checked_leaves, CheckedLeaves};
pub use filter::{SearchFilter, SearchMode};
pub use node::{GroupNode, LeafNode, Node, NodeId, StateField};
pub use tree::{SelectionTree, Walk};
