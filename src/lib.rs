//! change-uuid: reusable change identifiers for commit messages
//!
//! A `commit-msg` hook appends a `Change-UUID:` trailer to each commit message. Messages
//! with the same meaningful content within the retention window share one identifier, so
//! amending a commit or re-applying it keeps its identity.

pub mod clock;
pub mod config;
pub mod digest;
pub mod error;
pub mod hook;
pub mod logging;
pub mod message;
pub mod store;
pub mod tooling;
pub mod types;

pub use digest::{digest, digest_message};
pub use error::{ApiError, StorageError};
pub use hook::{Hook, HookOutcome, IdGenerator, UuidGenerator};
pub use store::{ChangeIdStore, FsChangeIdStore};
pub use types::{ChangeId, Fingerprint};
