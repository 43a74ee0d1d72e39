//! Configuration
//!
//! Precedence, lowest to highest: built-in defaults, global file
//! (`$XDG_CONFIG_HOME/change-uuid/config.toml`), explicit `--config` file, `CHANGE_UUID__*`
//! environment variables. CLI flags are applied on top by the binary.

pub mod sources;
pub mod xdg;

use crate::digest::DEFAULT_COMMENT_CHAR;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::message::DEFAULT_TRAILER_PREFIX;
use crate::store::DEFAULT_RETENTION_SECS;
use config::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeUuidConfig {
    pub store: StoreConfig,
    pub message: MessageConfig,
    pub logging: LoggingConfig,
}

fn default_retention_secs() -> u64 {
    DEFAULT_RETENTION_SECS
}

/// Binding store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store directory; None means `~/.git_hooks/_data/change_uuid`
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Seconds a binding stays reusable after its last use
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            retention_secs: default_retention_secs(),
        }
    }
}

impl StoreConfig {
    /// Resolve the store directory, falling back to the home-relative default
    pub fn resolve_path(&self) -> Result<PathBuf, ApiError> {
        match &self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => xdg::default_store_dir(),
        }
    }

    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }
}

fn default_trailer_prefix() -> String {
    DEFAULT_TRAILER_PREFIX.to_string()
}

fn default_comment_char() -> char {
    DEFAULT_COMMENT_CHAR
}

/// Commit message handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    /// Trailer prefix written before the identifier
    #[serde(default = "default_trailer_prefix")]
    pub trailer_prefix: String,

    /// Lines starting with this character are left out of the fingerprint
    #[serde(default = "default_comment_char")]
    pub comment_char: char,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            trailer_prefix: default_trailer_prefix(),
            comment_char: default_comment_char(),
        }
    }
}

impl ChangeUuidConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.store.retention_secs == 0 {
            return Err(ApiError::ConfigError(
                "store.retention_secs must be greater than zero".to_string(),
            ));
        }
        if self.message.trailer_prefix.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "message.trailer_prefix cannot be empty".to_string(),
            ));
        }
        if self.message.comment_char.is_whitespace() {
            return Err(ApiError::ConfigError(
                "message.comment_char cannot be whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global file, an optional explicit file, and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<ChangeUuidConfig, ApiError> {
        let mut builder = Config::builder();
        match xdg::global_config_path() {
            Ok(global) => builder = sources::file::add_to_builder(builder, &global, false),
            Err(e) => tracing::debug!("Skipping global config: {}", e),
        }
        if let Some(path) = explicit {
            builder = sources::file::add_to_builder(builder, path, true);
        }
        builder = sources::environment::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    /// Load a single file with the environment overlay, ignoring the global file.
    pub fn load_from_file(path: &Path) -> Result<ChangeUuidConfig, ApiError> {
        let builder = sources::file::add_to_builder(Config::builder(), path, true);
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    fn finish(config: Config) -> Result<ChangeUuidConfig, ApiError> {
        let config: ChangeUuidConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
