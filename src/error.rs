//! Error types
//!
//! `StorageError` covers the identifier store's filesystem layer. `ApiError` is what the
//! hook and configuration layers surface to the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the identifier store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Errors surfaced by the hook and its configuration
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Commit message file \"{}\" does not exist. Abort.", .0.display())]
    MessageNotFound(PathBuf),

    #[error("Failed to access commit message {}: {source}", .path.display())]
    MessageIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fingerprint: {0:?}")]
    InvalidFingerprint(String),

    #[error("Invalid change identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
