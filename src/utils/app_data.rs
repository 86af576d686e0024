use crate::config::SearchConfig;
use crate::loader::DataFiles;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "pokedex-search";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "data";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the JSON data files. Falls back to
    /// [`default_data_dir`] when unset.
    pub data_dir: Option<PathBuf>,

    /// File name of each category, relative to the data directory
    pub files: DataFiles,

    /// Ranking weights, fuzzy threshold and default limit
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a config file at an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.search.validate()?;
        Ok(config)
    }

    /// Save config to the app data directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Data directory to read from: the configured one, or the default
    pub fn effective_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Default location of the JSON data files
pub fn default_data_dir() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join(DATA_DIR))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.files, DataFiles::default());
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_app_config_partial_json() {
        let json = r#"{"data_dir": "/srv/pokedex", "search": {"default_limit": 5}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/pokedex")));
        assert_eq!(config.search.default_limit, 5);
        assert_eq!(config.files.moves, PathBuf::from("moves_data.json"));
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"files": {"items": "items.json"}}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.files.items, PathBuf::from("items.json"));
        assert_eq!(config.files.creatures, PathBuf::from("pokemon_data.json"));
    }

    #[test]
    fn test_load_from_rejects_invalid_search_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"search": {"fuzzy_threshold": 0}}"#).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("fuzzy_threshold"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/srv/pokedex")),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/tmp/pokedex")),
            ..Default::default()
        };
        assert_eq!(config.effective_data_dir().unwrap(), PathBuf::from("/tmp/pokedex"));
    }
}
