//! Home and XDG directory resolution.

use crate::error::ApiError;
use std::path::PathBuf;

/// Home directory of the invoking user
pub fn home_dir() -> Result<PathBuf, ApiError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| {
            ApiError::ConfigError("Could not determine home directory (HOME not set)".to_string())
        })
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }
    Ok(home_dir()?.join(".config"))
}

/// Global config file: `$XDG_CONFIG_HOME/change-uuid/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("change-uuid").join("config.toml"))
}

/// Default binding store: `~/.git_hooks/_data/change_uuid`
///
/// Shared with the other hooks of the `.git_hooks` namespace, hence not under XDG.
pub fn default_store_dir() -> Result<PathBuf, ApiError> {
    Ok(home_dir()?
        .join(".git_hooks")
        .join("_data")
        .join("change_uuid"))
}
