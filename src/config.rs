use crate::highlight::DEFAULT_THEME;
use crate::models::StorageManager;
use crate::models::storage::DATA_DIR_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_SENTINEL: &str = "```";

/// User settings read from `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snippet file; the platform data directory is used when unset
    pub data_file: Option<PathBuf>,
    pub theme: String,
    pub highlight: bool,
    pub format: bool,
    /// Line that ends multi-line code entry
    pub sentinel: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            theme: DEFAULT_THEME.to_string(),
            highlight: true,
            format: true,
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(DATA_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if settings.sentinel.trim().is_empty() {
            settings.sentinel = DEFAULT_SENTINEL.to_string();
        }
        Ok(settings)
    }

    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(StorageManager::default_path)
    }
}
