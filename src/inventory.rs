//! Inventory persistence
//!
//! The host document is exchanged as a JSON file. Writes go through a temp
//! file in the target directory and are renamed into place, so a crash never
//! leaves a half-written inventory behind.

use std::fs;
use std::path::Path;

use crate::error::{CropTreeError, CropTreeResult};
use crate::models::Inventory;

/// Load an inventory from a JSON file
pub fn load(path: &Path) -> CropTreeResult<Inventory> {
    let content = fs::read_to_string(path)?;
    parse(path, &content)
}

/// Parse inventory JSON, attributing errors to `path`
pub fn parse(path: &Path, content: &str) -> CropTreeResult<Inventory> {
    serde_json::from_str(content).map_err(|e| CropTreeError::InvalidInventory {
        file: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Atomically write an inventory as pretty JSON
pub fn save(path: &Path, inventory: &Inventory) -> CropTreeResult<()> {
    let mut content = serde_json::to_string_pretty(inventory)?;
    content.push('\n');

    crate::fs::write_atomic(path, &content)
}
