//! Change Identifier Store
//!
//! Maps message fingerprints to previously issued change identifiers. Each binding lives
//! entirely in the name of an empty file, `{fingerprint}_{change_id}`, and its last use is
//! the file's mtime. There is no index and no lock: creating an entry is a single filesystem
//! operation, and a lookup that races a concurrent sweep at worst misses an entry, which only
//! costs a fresh identifier.

pub mod filesystem;

use crate::error::StorageError;
use crate::types::{ChangeId, Fingerprint};
use regex::Regex;
use std::sync::OnceLock;
use std::time::SystemTime;

pub use filesystem::FsChangeIdStore;

/// Default retention window for a binding, in seconds
pub const DEFAULT_RETENTION_SECS: u64 = 10 * 60;

/// A stored fingerprint -> change identifier association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub fingerprint: Fingerprint,
    pub change_id: ChangeId,
    pub last_used: SystemTime,
}

fn entry_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<digest>[a-f0-9]{10})_(?P<uuid>[a-f0-9]{32})$").expect("valid regex")
    })
}

/// Build the entry name for a binding
pub fn entry_name(fingerprint: &Fingerprint, change_id: &ChangeId) -> String {
    format!("{}_{}", fingerprint, change_id)
}

/// Parse an entry name back into its fingerprint and change identifier
///
/// Anything not matching `{10 hex}_{32 hex}` exactly yields `None`; such entries are left
/// alone by lookups and sweeps.
pub fn parse_entry_name(name: &str) -> Option<(Fingerprint, ChangeId)> {
    let caps = entry_name_re().captures(name)?;
    let fingerprint = Fingerprint::parse(caps.name("digest")?.as_str()).ok()?;
    let change_id = ChangeId::parse(caps.name("uuid")?.as_str()).ok()?;
    Some((fingerprint, change_id))
}

/// Change identifier store interface
///
/// Both operations run the opportunistic expiry sweep first, hence `&mut self`.
pub trait ChangeIdStore {
    fn lookup(&mut self, fingerprint: &Fingerprint) -> Result<Option<ChangeId>, StorageError>;
    fn record(&mut self, fingerprint: &Fingerprint, change_id: &ChangeId)
        -> Result<(), StorageError>;
}
