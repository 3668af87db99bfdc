//! croptree - copy a view's crop region onto views picked from a checkbox tree
//!
//! Candidate views are arranged into a forest that mirrors the project
//! browser's folders. Users check groups or single views, narrow the tree
//! with a live filter, and the checked, visible views receive the source
//! view's crop region.

pub mod apply;
pub mod candidates;
pub mod config;
pub mod error;
pub mod fs;
pub mod inventory;
pub mod models;
pub mod presentation;
pub mod selection;

// Re-exports for convenience
pub use apply::{copy_crop, ApplyFailure, ApplyReport};
pub use config::{Config, Preferences};
pub use error::{CropTreeError, CropTreeResult};
pub use models::{Inventory, ViewId, ViewKind, ViewRecord};
pub use selection::{build_tree, checked_items, BuildItem, SelectionTree, SortOrder};
