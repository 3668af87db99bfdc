//! Filesystem helpers

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{CropTreeError, CropTreeResult};

/// Write `content` to `path` through a temp file in the same directory
///
/// Readers see either the old file or the new one, never a partial write.
pub fn write_atomic(path: &Path, content: &str) -> CropTreeResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| CropTreeError::Io(e.error))?;
    Ok(())
}
