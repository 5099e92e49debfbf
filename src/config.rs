//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-shelf\config.toml
//! - macOS: ~/Library/Application Support/music-shelf/config.toml
//! - Linux: ~/.config/music-shelf/config.toml
//!
//! The file is human-readable and editable. Command-line arguments override
//! whatever is configured here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Import settings
    pub import: ImportConfig,
}

/// Import settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Directory the source files are read from
    pub source_root: PathBuf,

    /// Directory the organized library is written to
    pub library_root: PathBuf,

    /// Fold repeated artist/album names onto one catalog node instead of
    /// keeping duplicate nodes
    pub merge_duplicate_albums: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("ipod_music"),
            library_root: PathBuf::from("music"),
            merge_duplicate_albums: false,
        }
    }
}

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-shelf"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

impl Config {
    /// Load the config file, or `None` when it does not exist or fails to
    /// parse. Callers fall back to `Config::default()`.
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        let contents = std::fs::read_to_string(path).ok()?;
        toml::from_str(&contents).ok()
    }
}
