//! Editor configuration persistence
//!
//! Stores export preferences and the starting grid size in
//! `<config dir>/latex-grid-editor/config.json`.

use crate::export::ExportPreferences;
use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "latex-grid-editor";
const CONFIG_FILE: &str = "config.json";

/// Path of the config file, if the platform has a config directory
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub export: ExportPreferences,
    pub initial_rows: usize,
    pub initial_cols: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            export: ExportPreferences::default(),
            initial_rows: DEFAULT_ROWS,
            initial_cols: DEFAULT_COLS,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if missing or unreadable
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config.clamped())
    }

    /// Save config to the default location, creating the directory
    pub fn save(&self) -> Result<()> {
        let path = config_path().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    fn clamped(mut self) -> Self {
        self.initial_rows = self.initial_rows.clamp(1, MAX_ROWS);
        self.initial_cols = self.initial_cols.clamp(1, MAX_COLS);
        self
    }
}
