//! Console configuration persistence
//!
//! Stores user preferences in `~/.config/spooky-console/config.yaml`. Every
//! section is optional in the file; missing fields fall back to defaults.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::{GridConfig, GridGeometry, ResizeProtocol, Size};
use crate::theme::VisualsData;

/// Console configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Name shown in every window title
    #[serde(default = "default_prog_name")]
    pub prog_name: String,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub visuals: VisualsData,
    /// Initial viewport of headless windows
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub journal: JournalSettings,
}

fn default_prog_name() -> String {
    "spooky".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prog_name: default_prog_name(),
            grid: GridSettings::default(),
            visuals: VisualsData::default(),
            viewport: ViewportSettings::default(),
            journal: JournalSettings::default(),
        }
    }
}

/// Defaults for every new window's grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub width: usize,
    pub height: usize,
    pub cell_width: u32,
    pub cell_height: u32,
    pub column_padding: u32,
    pub row_padding: u32,
    pub resize_protocol: ResizeProtocol,
    pub resize_debounce_ms: u64,
}

impl Default for GridSettings {
    fn default() -> Self {
        let geometry = GridGeometry::default();
        Self {
            width: geometry.width,
            height: geometry.height,
            cell_width: geometry.cell_width,
            cell_height: geometry.cell_height,
            column_padding: geometry.column_padding,
            row_padding: geometry.row_padding,
            resize_protocol: ResizeProtocol::default(),
            resize_debounce_ms: crate::grid::RESIZE_DEBOUNCE.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 250,
            height: 250,
        }
    }
}

impl ViewportSettings {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    pub enabled: bool,
    /// Records cached in memory before they are written out
    pub flush_every: usize,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            flush_every: 8,
        }
    }
}

impl ConsoleConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults when it is missing or malformed
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Grid construction parameters, resolving the colour strings
    pub fn grid_config(&self) -> Result<GridConfig> {
        let (highlight, grid_visual) = self.visuals.resolve()?;
        let grid = &self.grid;
        Ok(GridConfig {
            geometry: GridGeometry::new(
                grid.width,
                grid.height,
                grid.cell_width,
                grid.cell_height,
                grid.column_padding,
                grid.row_padding,
            ),
            resize_protocol: grid.resize_protocol,
            resize_debounce: Duration::from_millis(grid.resize_debounce_ms),
            highlight,
            grid_visual,
        })
    }
}
