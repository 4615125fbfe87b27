//! Persisted user preference (interface language)
//!
//! Stored as a one-key JSON object under the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::config::{APP_DIR, FILENAME};
use crate::i18n::Language;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub lang: Language,
}

impl Settings {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(FILENAME);
        path
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load settings; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                info!(path = %path.display(), error = %e, "No saved settings, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&contents) {
            Ok(settings) => {
                info!(path = %path.display(), lang = settings.lang.code(), "Loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write settings to {:?}", path))?;

        info!(path = %path.display(), lang = self.lang.code(), "Saved settings");
        Ok(())
    }
}
