//! Error types for croptree
//!
//! Uses `thiserror` for library errors. The selection tree itself is total
//! and never fails; these cover the host document, configuration and the
//! checks made before a tree is built.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::{ViewId, ViewKind};

/// Result type alias for croptree operations
pub type CropTreeResult<T> = Result<T, CropTreeError>;

/// Main error type for croptree operations
#[derive(Error, Debug)]
pub enum CropTreeError {
    /// Inventory file could not be parsed
    #[error("invalid inventory {file}: {message}")]
    InvalidInventory { file: PathBuf, message: String },

    /// Config file could not be parsed
    #[error("invalid config {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Requested view does not exist
    #[error("view {id} not found in inventory")]
    ViewNotFound { id: ViewId },

    /// Source view has no crop region to copy
    #[error("view '{name}' ({kind}) has no crop region to copy")]
    SourceNotCroppable { name: String, kind: ViewKind },

    /// No view can receive the source's crop region
    #[error("no views can receive the crop region of '{name}'")]
    NoCandidates { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CropTreeError {
    /// Errors that mean "nothing to do" rather than failure
    pub fn is_cancellation(&self) -> bool {
        matches!(self, CropTreeError::NoCandidates { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_croppable() {
        let err = CropTreeError::SourceNotCroppable {
            name: "Door Schedule".to_string(),
            kind: ViewKind::Schedule,
        };
        assert_eq!(
            err.to_string(),
            "view 'Door Schedule' (schedule) has no crop region to copy"
        );
    }

    #[test]
    fn test_error_display_view_not_found() {
        let err = CropTreeError::ViewNotFound { id: ViewId(42) };
        assert_eq!(err.to_string(), "view 42 not found in inventory");
    }

    #[test]
    fn test_no_candidates_is_cancellation() {
        let err = CropTreeError::NoCandidates {
            name: "Level 1".to_string(),
        };
        assert!(err.is_cancellation());
        assert!(!CropTreeError::ViewNotFound { id: ViewId(1) }.is_cancellation());
    }
}
