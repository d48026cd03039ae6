//! Configuration system tests
//!
//! Tests for config paths and console config loading/saving.

use spooky_console::config::ConsoleConfig;
use spooky_console::config_paths;
use spooky_console::grid::ResizeProtocol;
use spooky_console::theme::Color;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("spooky-console"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_journal_file_is_in_config_dir() {
    let config = config_paths::config_dir().unwrap();
    let journal = config_paths::journal_file().unwrap();
    assert!(journal.starts_with(&config));
    assert!(journal.to_string_lossy().ends_with("layout.jsonl"));
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    let config = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&config));
}

// ========================================================================
// Console Config Tests
// ========================================================================

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConsoleConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config, ConsoleConfig::default());
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "grid: [this is not a map").unwrap();
    assert_eq!(ConsoleConfig::load_from(&path), ConsoleConfig::default());
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = ConsoleConfig::default();
    config.prog_name = "rover".to_string();
    config.grid.width = 9;
    config.grid.resize_protocol = ResizeProtocol::None;
    config.visuals.highlight.fill = "#ff0000".to_string();
    config.save_to(&path).unwrap();

    let loaded = ConsoleConfig::load_from(&path);
    assert_eq!(loaded, config);
    let grid = loaded.grid_config().unwrap();
    assert_eq!(grid.geometry.width, 9);
    assert_eq!(grid.resize_protocol, ResizeProtocol::None);
    assert_eq!(grid.highlight.fill, Color::rgb(0xff, 0x00, 0x00));
}

#[test]
fn test_protocol_names_in_yaml() {
    for (name, protocol) in [
        ("none", ResizeProtocol::None),
        ("cells", ResizeProtocol::ExpandCells),
        ("expand-cells", ResizeProtocol::ExpandCells),
        ("add-padding", ResizeProtocol::AddPadding),
    ] {
        let yaml = format!("grid:\n  resize_protocol: {}\n", name);
        let config: ConsoleConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.grid.resize_protocol, protocol, "{}", name);
    }
    assert!(serde_yaml::from_str::<ConsoleConfig>("grid:\n  resize_protocol: stretch\n").is_err());
}

#[test]
fn test_debounce_is_configurable() {
    let config: ConsoleConfig =
        serde_yaml::from_str("grid:\n  resize_debounce_ms: 120\n").unwrap();
    let grid = config.grid_config().unwrap();
    assert_eq!(grid.resize_debounce.as_millis(), 120);
}
