//! Configuration loading and persistence

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CropTreeError, CropTreeResult};
use crate::selection::SearchMode;

use super::types::{Config, Preferences};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> CropTreeResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| CropTreeError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Location of the user config file
pub fn user_config_path() -> Option<PathBuf> {
    dirs_config_dir().map(|dir| dir.join("croptree").join("config.toml"))
}

/// Apply environment variable overrides (CROPTREE_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // CROPTREE_COPY_CROP_VISIBILITY
    if let Ok(val) = std::env::var("CROPTREE_COPY_CROP_VISIBILITY") {
        config.croptree.copy_crop_visibility = parse_flag(&val);
    }

    // CROPTREE_COPY_SECTION_BOX
    if let Ok(val) = std::env::var("CROPTREE_COPY_SECTION_BOX") {
        config.croptree.copy_section_box = parse_flag(&val);
    }

    // CROPTREE_SEARCH_MODE
    if let Ok(mode) = std::env::var("CROPTREE_SEARCH_MODE") {
        if let Ok(mode) = mode.parse::<SearchMode>() {
            config.search.mode = mode;
        }
    }

    config
}

fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Save copy preferences to the config file
///
/// The file is parsed as a TOML table and only its `croptree` entry is
/// replaced. Comments do not survive the rewrite.
pub fn save_preferences(config_path: &Path, prefs: &Preferences) -> CropTreeResult<()> {
    let existing = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let mut table: toml::Table = existing.parse().map_err(|e: toml::de::Error| {
        CropTreeError::InvalidConfig {
            file: config_path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    table.insert("croptree".to_string(), toml::Value::try_from(prefs)?);

    crate::fs::write_atomic(config_path, &toml::to_string(&table)?)
}

/// Get XDG config directory
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
}

/// Line of the `key = ...` assignment or `[... .key]` header naming `key`
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            let line = line.trim_start();
            if let Some(header) = line.strip_prefix('[') {
                let name = header.trim_start_matches('[').split(']').next().unwrap_or("");
                return name.rsplit('.').next().map(str::trim) == Some(key);
            }
            line.strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "croptree",
        "copy_crop_visibility",
        "copy_section_box",
        "search",
        "mode",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            Some((_, best_dist)) if dist >= best_dist => best,
            _ => Some((*candidate, dist)),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
