//! Configuration module for croptree
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CROPTREE_*)
//! 3. User config ($XDG_CONFIG_HOME/croptree/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{user_config_path, ConfigWarning};
pub use types::{ColorMode, Config, OutputConfig, Preferences, SearchConfig};
