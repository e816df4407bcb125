//! Note name rules.
//!
//! A name becomes the stem of `<root>/<name>.txt`, so anything that could
//! escape the root directory or collide with hidden files is rejected here,
//! before any path is built.

use super::error::{NoteError, NoteResult};

/// File extension used for every note on disk.
pub const NOTE_EXTENSION: &str = "txt";

/// Longest accepted name in bytes; `<name>.txt` must fit a 255-byte filename.
pub const MAX_NAME_LEN: usize = 255 - NOTE_EXTENSION.len() - 1;

/// Check that `name` is safe to use as a filename stem inside the notes directory.
pub fn validate(name: &str) -> NoteResult<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.len() > MAX_NAME_LEN {
        Some("name is too long")
    } else if name.starts_with('.') {
        Some("name must not start with '.'")
    } else if name.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else if name.contains('\0') {
        Some("name must not contain NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(NoteError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Filename for a note, e.g. "groceries" -> "groceries.txt"
pub fn file_name(name: &str) -> String {
    format!("{}.{}", name, NOTE_EXTENSION)
}
