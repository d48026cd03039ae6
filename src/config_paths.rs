//! Where spooky-console keeps its files
//!
//! One directory holds the config, the layout journal and the logs:
//! `$XDG_CONFIG_HOME/spooky-console` (falling back to `~/.config`) on Unix
//! and macOS, `%APPDATA%\spooky-console` on Windows.

use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "spooky-console";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "spooky.log";

pub fn config_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "windows") {
        env::var_os("APPDATA").map(PathBuf::from)
    } else {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    base.map(|dir| dir.join(APP_DIR))
}

fn in_config_dir(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

pub fn config_file() -> Option<PathBuf> {
    in_config_dir("config.yaml")
}

/// Append-only record of layout changes, one JSON object per line
pub fn journal_file() -> Option<PathBuf> {
    in_config_dir("layout.jsonl")
}

pub fn logs_dir() -> Option<PathBuf> {
    in_config_dir("logs")
}

/// Create the logs directory and its parents, returning it
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir().context("No config directory available")?;
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create directory {}", logs.display()))?;
    Ok(logs)
}
