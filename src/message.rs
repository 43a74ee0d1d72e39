//! Commit message file access
//!
//! Reads the message git hands to the `commit-msg` hook, detects an existing change
//! trailer, and appends a new one. The message is handled as bytes since its encoding
//! follows `i18n.commitEncoding` and need not be UTF-8.

use crate::digest::digest_message;
use crate::error::ApiError;
use crate::types::{ChangeId, Fingerprint};
use regex::bytes::Regex;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Default trailer prefix
pub const DEFAULT_TRAILER_PREFIX: &str = "Change-UUID:";

/// Commit message loaded from disk
#[derive(Debug, Clone)]
pub struct CommitMessage {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl CommitMessage {
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ApiError::MessageNotFound(path.to_path_buf())
            } else {
                ApiError::MessageIo {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
    }

    /// Change identifier already present as a trailer line, if any
    pub fn existing_change_id(&self, prefix: &str) -> Option<ChangeId> {
        let re = trailer_regex(prefix);
        self.lines().find_map(|line| {
            let caps = re.captures(line)?;
            let uuid = std::str::from_utf8(&caps["uuid"]).ok()?;
            ChangeId::parse(uuid).ok()
        })
    }

    /// Fingerprint of the meaningful lines, `None` for an empty message
    pub fn fingerprint(&self, comment_char: char) -> Option<Fingerprint> {
        digest_message(&self.bytes, comment_char)
    }

    /// Append `\n<prefix> <id>` to the file and to the in-memory text
    pub fn append_change_id(&mut self, prefix: &str, change_id: &ChangeId) -> Result<(), ApiError> {
        let trailer = format!("\n{} {}", prefix, change_id);
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(trailer.as_bytes())
            .map_err(|e| self.io_error(e))?;
        self.bytes.extend_from_slice(trailer.as_bytes());
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> ApiError {
        ApiError::MessageIo {
            path: self.path.clone(),
            source,
        }
    }
}

fn trailer_regex(prefix: &str) -> Regex {
    let pattern = format!(r"^{}\s*(?P<uuid>[a-f0-9]{{32}})\s*$", regex::escape(prefix));
    Regex::new(&pattern).expect("escaped prefix forms a valid regex")
}
