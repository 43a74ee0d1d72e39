//! commit-msg hook
//!
//! Ties the pieces together: read the message, fingerprint it, reuse or mint a change
//! identifier, append the trailer and record the binding.

use crate::config::ChangeUuidConfig;
use crate::error::ApiError;
use crate::message::CommitMessage;
use crate::store::{ChangeIdStore, FsChangeIdStore};
use crate::types::ChangeId;
use std::path::Path;
use tracing::info;

/// Generates fresh change identifiers.
///
/// Swappable so tests can hand out a predictable sequence.
pub trait IdGenerator {
    fn generate(&mut self) -> ChangeId;
}

/// Random v4 UUIDs in simple (undashed) lowercase form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&mut self) -> ChangeId {
        ChangeId::from(uuid::Uuid::new_v4())
    }
}

/// What the hook did with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The message already carried a trailer; nothing written
    AlreadyTagged(ChangeId),
    /// Only comments or blank lines; nothing written, store untouched
    EmptyMessage,
    /// A live binding for the same content was found and reused
    Reused(ChangeId),
    /// No binding existed; a new identifier was generated
    Generated(ChangeId),
}

impl HookOutcome {
    pub fn change_id(&self) -> Option<&ChangeId> {
        match self {
            HookOutcome::AlreadyTagged(id) | HookOutcome::Reused(id) | HookOutcome::Generated(id) => {
                Some(id)
            }
            HookOutcome::EmptyMessage => None,
        }
    }
}

/// Hook runner over a store and an identifier source
pub struct Hook<S, G> {
    store: S,
    generator: G,
    trailer_prefix: String,
    comment_char: char,
}

impl Hook<FsChangeIdStore, UuidGenerator> {
    /// Build the production hook from configuration
    pub fn from_config(config: &ChangeUuidConfig) -> Result<Self, ApiError> {
        let store = FsChangeIdStore::new(config.store.resolve_path()?)
            .with_retention(config.store.retention());
        Ok(Self::new(store, UuidGenerator, config))
    }
}

impl<S: ChangeIdStore, G: IdGenerator> Hook<S, G> {
    pub fn new(store: S, generator: G, config: &ChangeUuidConfig) -> Self {
        Self {
            store,
            generator,
            trailer_prefix: config.message.trailer_prefix.clone(),
            comment_char: config.message.comment_char,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process the commit message at `path`
    pub fn run(&mut self, path: &Path) -> Result<HookOutcome, ApiError> {
        let mut message = CommitMessage::load(path)?;

        if let Some(existing) = message.existing_change_id(&self.trailer_prefix) {
            info!(change_id = %existing, "Found existing change identifier. Do nothing.");
            return Ok(HookOutcome::AlreadyTagged(existing));
        }

        let Some(fingerprint) = message.fingerprint(self.comment_char) else {
            info!("Empty message detected. Do nothing");
            return Ok(HookOutcome::EmptyMessage);
        };
        info!(%fingerprint, "No change identifier in message");

        let (change_id, reused) = match self.store.lookup(&fingerprint)? {
            Some(change_id) => {
                info!(%change_id, "Found change identifier for digest");
                (change_id, true)
            }
            None => {
                let change_id = self.generator.generate();
                info!(%change_id, "No change identifier for digest, generated new one");
                (change_id, false)
            }
        };

        info!(path = %path.display(), "Writing change identifier to commit message");
        message.append_change_id(&self.trailer_prefix, &change_id)?;
        self.store.record(&fingerprint, &change_id)?;

        Ok(if reused {
            HookOutcome::Reused(change_id)
        } else {
            HookOutcome::Generated(change_id)
        })
    }
}
