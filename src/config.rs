//! Table editing configuration
//!
//! Stored in `~/.config/pipegrid/config.yaml`. The loaded value is handed to
//! every top-level operation; nothing here is global.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::table::DEFAULT_DELIMITER;

/// Feature switches for table editing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Column delimiter of the table syntax
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Copy selections that cross cells as tab/newline text
    #[serde(default = "enabled")]
    pub smart_copy: bool,

    /// Merge tab/newline clipboard text into tables
    #[serde(default = "enabled")]
    pub smart_paste: bool,

    /// Realign the table after typing or deleting inside a cell
    #[serde(default = "enabled")]
    pub format_on_type: bool,

    /// Let the delimiter key and Enter create columns and rows
    #[serde(default = "enabled")]
    pub structural_edits: bool,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn enabled() -> bool {
    true
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            smart_copy: true,
            smart_paste: true,
            format_on_type: true,
            structural_edits: true,
        }
    }
}

impl TableConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from an explicit file, falling back to defaults
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

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
