//! Core types for the change identifier store.

use crate::error::ApiError;
use std::fmt;
use std::str::FromStr;

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_LEN: usize = 10;

/// Length of a change identifier in hex characters
pub const CHANGE_ID_LEN: usize = 32;

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Fingerprint: short lowercase hex digest of a message's meaningful lines
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Parse a fingerprint, requiring exactly 10 lowercase hex characters
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        if is_lower_hex(s, FINGERPRINT_LEN) {
            Ok(Fingerprint(s.to_string()))
        } else {
            Err(ApiError::InvalidFingerprint(s.to_string()))
        }
    }

    pub(crate) fn from_digest_hex(hex: String) -> Self {
        debug_assert!(is_lower_hex(&hex, FINGERPRINT_LEN));
        Fingerprint(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fingerprint::parse(s)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// ChangeId: 32 lowercase hex characters naming a logical change
///
/// No separators, so the value is safe inside filenames and search tools that treat `-`
/// as a metacharacter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangeId(String);

impl ChangeId {
    /// Parse an identifier, requiring exactly 32 lowercase hex characters
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        if is_lower_hex(s, CHANGE_ID_LEN) {
            Ok(ChangeId(s.to_string()))
        } else {
            Err(ApiError::InvalidIdentifier(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChangeId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangeId::parse(s)
    }
}

impl From<uuid::Uuid> for ChangeId {
    fn from(uuid: uuid::Uuid) -> Self {
        // simple form: 32 lowercase hex digits, no dashes
        ChangeId(uuid.simple().to_string())
    }
}

impl AsRef<str> for ChangeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
