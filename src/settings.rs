/// Persisted viewer settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/target-explorer/settings.json
/// - macOS: ~/Library/Application Support/target-explorer/settings.json
/// - Windows: %APPDATA%\target-explorer\settings.json

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to write settings {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Viewer preferences that survive restarts
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Settings {
    /// Dataset folder opened most recently
    pub last_dataset_dir: Option<PathBuf>,
    /// Unix timestamp of the last dataset open
    pub last_opened_at: Option<i64>,
}

impl Settings {
    /// Load settings from disk, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Settings::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("ignoring corrupt settings {}: {}", path.display(), e);
                    Settings::default()
                }
            },
            // Missing file on first run is the normal case
            Err(_) => Settings::default(),
        }
    }

    /// Remember a dataset folder and stamp the open time, then persist.
    pub fn remember_dataset(&mut self, dir: PathBuf) -> Result<(), SettingsError> {
        self.last_dataset_dir = Some(dir);
        self.last_opened_at = Some(Utc::now().timestamp());
        self.save()
    }

    /// Write the settings file, creating the parent directory if needed.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;

        log::debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// Where the settings file lives
    fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("target-explorer");
        path.push("settings.json");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            last_dataset_dir: Some(PathBuf::from("/datasets/docking")),
            last_opened_at: Some(1_700_000_000),
        };

        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();

        assert_eq!(settings, restored);
    }

    #[test]
    fn test_corrupt_json_falls_back_to_default() {
        let parsed: Result<Settings, _> = serde_json::from_str("{not json");
        assert!(parsed.is_err());
        // Settings::load() maps this failure to defaults
        assert_eq!(Settings::default().last_dataset_dir, None);
    }
}
