//! Message digest
//!
//! Reduces the meaningful lines of a commit message to a short fingerprint. This is not
//! meant to mimic `git stripspace`: it only needs to detect empty messages and to keep the
//! comment section (file lists, instructions) out of the hash.

use crate::types::{Fingerprint, FINGERPRINT_LEN};

/// Default comment marker used by git
pub const DEFAULT_COMMENT_CHAR: char = '#';

fn trim_end(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &line[..end]
}

fn is_meaningful(line: &[u8], comment: &[u8]) -> bool {
    !line.starts_with(comment) && !trim_end(line).is_empty()
}

/// Compute the fingerprint of a sequence of message lines
///
/// Lines are raw bytes: git passes messages in whatever `i18n.commitEncoding` says, so
/// they need not be UTF-8. Lines starting with `comment_char` and lines that are blank
/// after trailing-whitespace removal are skipped. Returns `None` when no line qualifies,
/// which callers treat as "nothing to store".
pub fn digest<I, S>(lines: I, comment_char: char) -> Option<Fingerprint>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut buf = [0u8; 4];
    let comment = comment_char.encode_utf8(&mut buf).as_bytes();
    let mut hasher = blake3::Hasher::new();
    let mut is_empty = true;

    for line in lines {
        let line = line.as_ref();
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if !is_meaningful(line, comment) {
            continue;
        }
        is_empty = false;
        hasher.update(line);
        hasher.update(b"\n");
    }

    if is_empty {
        return None;
    }

    let hash = hasher.finalize();
    let hex = hex::encode(&hash.as_bytes()[..FINGERPRINT_LEN / 2]);
    Some(Fingerprint::from_digest_hex(hex))
}

/// Compute the fingerprint of a whole message, split on `\n`
pub fn digest_message<T>(text: &T, comment_char: char) -> Option<Fingerprint>
where
    T: AsRef<[u8]> + ?Sized,
{
    digest(text.as_ref().split(|&b| b == b'\n'), comment_char)
}
