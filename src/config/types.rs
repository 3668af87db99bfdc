//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CropTreeResult;
use crate::selection::SearchMode;

use super::loader;
use super::ConfigWarning;

/// Copy preferences, persisted under `[croptree]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    /// Copy crop active/visible and annotation crop flags from the source
    #[serde(default)]
    pub copy_crop_visibility: bool,

    /// Copy the section box between 3D views
    #[serde(default)]
    pub copy_section_box: bool,
}

/// Search configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: SearchMode,
}

/// Output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub croptree: Preferences,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CropTreeResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> CropTreeResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (CROPTREE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Persist the copy preferences
    ///
    /// Replaces the `[croptree]` table of `config_path` and keeps the values of
    /// every other table.
    pub fn save_preferences(config_path: &Path, prefs: &Preferences) -> CropTreeResult<()> {
        loader::save_preferences(config_path, prefs)
    }
}
