//! Filesystem-backed change identifier store.

use super::{entry_name, parse_entry_name, Binding, ChangeIdStore, DEFAULT_RETENTION_SECS};
use crate::clock::{Clock, SystemClock};
use crate::error::StorageError;
use crate::types::{ChangeId, Fingerprint};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// Store keeping one empty file per binding under a single directory
///
/// The value is meant to live for one hook invocation. The dirty flag starts set so the
/// first operation of each process sweeps once; later operations only sweep again after a
/// `record`.
pub struct FsChangeIdStore {
    root: PathBuf,
    retention: Duration,
    dirty: bool,
    clock: Box<dyn Clock>,
}

impl FsChangeIdStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            retention: Duration::from_secs(DEFAULT_RETENTION_SECS),
            dirty: true,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    fn entry_path(&self, fingerprint: &Fingerprint, change_id: &ChangeId) -> PathBuf {
        self.root.join(entry_name(fingerprint, change_id))
    }

    /// Open the store directory, mapping absence to `None`
    fn read_root(&self) -> Result<Option<fs::ReadDir>, StorageError> {
        match fs::read_dir(&self.root) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&self.root, e)),
        }
    }

    /// Whether `entry` is a regular file. A vanished entry counts as not one.
    fn is_entry_file(entry: &fs::DirEntry) -> Result<bool, StorageError> {
        match entry.file_type() {
            Ok(file_type) => Ok(file_type.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(entry.path(), e)),
        }
    }

    /// Delete bindings older than the retention window
    ///
    /// Returns the number of entries removed. Entries that disappear mid-sweep were removed
    /// by a concurrent invocation and are skipped.
    fn sweep(&mut self) -> Result<usize, StorageError> {
        if !self.dirty {
            return Ok(0);
        }
        let Some(entries) = self.read_root()? else {
            return Ok(0);
        };

        info!(path = %self.root.display(), "Doing cleanup");
        let now = self.clock.now();
        let mut removed = 0;

        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.root, e))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if parse_entry_name(name).is_none() || !Self::is_entry_file(&entry)? {
                continue;
            }

            let path = entry.path();
            let modified = match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(StorageError::io(&path, e)),
            };

            // mtime ahead of the clock counts as fresh
            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
            if age <= self.retention {
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    info!(path = %path.display(), age_secs = age.as_secs(), "Delete expired binding");
                    removed += 1;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::io(&path, e)),
            }
        }

        self.dirty = false;
        Ok(removed)
    }

    /// List every well-formed binding with its last-used time
    ///
    /// Read-only: does not sweep, so expired but not yet deleted entries are included.
    pub fn bindings(&self) -> Result<Vec<Binding>, StorageError> {
        let Some(entries) = self.read_root()? else {
            return Ok(Vec::new());
        };

        let mut bindings = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.root, e))?;
            let Some((fingerprint, change_id)) =
                entry.file_name().to_str().and_then(parse_entry_name)
            else {
                continue;
            };
            if !Self::is_entry_file(&entry)? {
                continue;
            }
            let last_used = match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(StorageError::io(entry.path(), e)),
            };
            bindings.push(Binding {
                fingerprint,
                change_id,
                last_used,
            });
        }
        Ok(bindings)
    }

    fn touch(&self, path: &Path, at: SystemTime) -> Result<(), StorageError> {
        let file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| StorageError::io(path, e))?;
        file.set_modified(at).map_err(|e| StorageError::io(path, e))
    }
}

impl ChangeIdStore for FsChangeIdStore {
    fn lookup(&mut self, fingerprint: &Fingerprint) -> Result<Option<ChangeId>, StorageError> {
        self.sweep()?;
        let Some(entries) = self.read_root()? else {
            debug!(path = %self.root.display(), "Store directory absent");
            return Ok(None);
        };

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry in {}: {}", self.root.display(), e);
                    continue;
                }
            };
            let Some((entry_fingerprint, change_id)) =
                entry.file_name().to_str().and_then(parse_entry_name)
            else {
                continue;
            };
            if &entry_fingerprint != fingerprint {
                continue;
            }
            match Self::is_entry_file(&entry) {
                Ok(true) => {
                    debug!(%fingerprint, %change_id, "Found binding");
                    return Ok(Some(change_id));
                }
                Ok(false) => {}
                Err(e) => warn!("Failed to inspect store entry: {}", e),
            }
        }
        Ok(None)
    }

    fn record(
        &mut self,
        fingerprint: &Fingerprint,
        change_id: &ChangeId,
    ) -> Result<(), StorageError> {
        self.sweep()?;
        fs::create_dir_all(&self.root).map_err(|e| StorageError::io(&self.root, e))?;

        let path = self.entry_path(fingerprint, change_id);
        self.touch(&path, self.clock.now())?;
        debug!(path = %path.display(), "Recorded binding");

        self.dirty = true;
        Ok(())
    }
}
