use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type NoteResult<T> = Result<T, NoteError>;

/// Errors produced by the note store and its backends.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note already exists: {name}")]
    AlreadyExists { name: String },

    #[error("note not found: {name}")]
    NotFound { name: String },

    #[error("invalid note name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// The configured root directory is missing; the service cannot start.
    #[error("notes directory does not exist: {path}")]
    RootMissing { path: PathBuf },

    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NoteError {
    pub fn already_exists(name: &str) -> Self {
        Self::AlreadyExists {
            name: name.to_string(),
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}
