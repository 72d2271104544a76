//! Application configuration loaded from a TOML file.
//!
//! All fields have serde defaults so picorg works without a config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub organize: OrganizeConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Browsing preferences applied to every listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default = "default_sort")]
    pub default_sort: String,
    #[serde(default)]
    pub sort_descending: bool,
    #[serde(default = "default_true")]
    pub sort_dirs_first: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            default_sort: default_sort(),
            sort_descending: false,
            sort_dirs_first: true,
        }
    }
}

/// Model-server and cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeConfig {
    /// Base URL of the external model server.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Overrides the default cache directory
    /// (`$HOME/.config/picorg/organized`).
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            cache_dir: None,
        }
    }
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_true() -> bool {
    true
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
