//! Tests for the config module

use super::types::*;
use crate::selection::SearchMode;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(!config.croptree.copy_crop_visibility);
    assert!(!config.croptree.copy_section_box);
    assert_eq!(config.search.mode, SearchMode::Substring);
    assert_eq!(config.output.color, ColorMode::Auto);
    assert!(config.output.unicode);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[croptree]
copy_crop_visibility = true

[search]
mode = "fuzzy"

[output]
color = "never"
unicode = false
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert!(config.croptree.copy_crop_visibility);
    assert!(!config.croptree.copy_section_box);
    assert_eq!(config.search.mode, SearchMode::Fuzzy);
    assert_eq!(config.output.color, ColorMode::Never);
    assert!(!config.output.unicode);
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[croptree]\ncopy_section_bx = true\n\n[output]\ncolour = \"never\"\n",
    )
    .unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(warnings.len(), 2);

    assert_eq!(warnings[0].key, "copy_section_bx");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("copy_section_box"));

    assert_eq!(warnings[1].key, "colour");
    assert_eq!(warnings[1].suggestion.as_deref(), Some("color"));
}

#[test]
fn test_load_invalid_toml_names_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[search]\nmode = \"regex\"\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("invalid config"), "{msg}");
    assert!(msg.contains("config.toml"), "{msg}");
}

#[test]
fn test_save_preferences_creates_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("croptree").join("config.toml");
    let prefs = Preferences {
        copy_crop_visibility: true,
        copy_section_box: false,
    };

    Config::save_preferences(&path, &prefs).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.croptree, prefs);
}

#[test]
fn test_save_preferences_preserves_other_sections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "# my settings\n[search]\nmode = \"fuzzy\"\n\n[croptree]\ncopy_crop_visibility = true\ncopy_section_box = true\n\n[output]\nunicode = false\n",
    )
    .unwrap();

    let prefs = Preferences {
        copy_crop_visibility: false,
        copy_section_box: true,
    };
    Config::save_preferences(&path, &prefs).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.matches("[croptree]").count(), 1);

    let config = Config::load(&path).unwrap();
    assert_eq!(config.croptree, prefs);
    assert_eq!(config.search.mode, SearchMode::Fuzzy);
    assert!(!config.output.unicode);
}

#[test]
fn test_save_preferences_replaces_decorated_headers() {
    let dir = tempdir().unwrap();
    let prefs = Preferences {
        copy_crop_visibility: false,
        copy_section_box: true,
    };

    for existing in [
        "[croptree] # tool prefs\ncopy_crop_visibility = true\n",
        "[ croptree ]\ncopy_crop_visibility = true\n",
        "[croptree]\r\ncopy_crop_visibility = true\r\n",
    ] {
        let path = dir.path().join("config.toml");
        fs::write(&path, existing).unwrap();

        Config::save_preferences(&path, &prefs).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.croptree, prefs, "after rewriting {existing:?}");
    }
}

#[test]
fn test_save_preferences_keeps_broken_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[croptree\ncopy_section_box = true\n").unwrap();

    let err = Config::save_preferences(&path, &Preferences::default()).unwrap_err();
    assert!(err.to_string().starts_with("invalid config"), "{err}");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[croptree\ncopy_section_box = true\n"
    );
}

#[test]
fn test_env_overrides() {
    std::env::set_var("CROPTREE_COPY_SECTION_BOX", "true");
    std::env::set_var("CROPTREE_SEARCH_MODE", "fuzzy");

    let config = Config::default().with_env_overrides();

    std::env::remove_var("CROPTREE_COPY_SECTION_BOX");
    std::env::remove_var("CROPTREE_SEARCH_MODE");

    assert!(config.croptree.copy_section_box);
    assert!(!config.croptree.copy_crop_visibility);
    assert_eq!(config.search.mode, SearchMode::Fuzzy);
}
