//! Storage backends for notes.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use super::error::{NoteError, NoteResult};
use super::file_ops;

/// Raw name-addressed storage. Names passed in are already validated.
///
/// `create` must be atomic create-if-absent; the other operations carry
/// no existence gate beyond what their return values report.
#[async_trait]
pub trait NoteBackend: Send + Sync {
    async fn exists(&self, name: &str) -> NoteResult<bool>;

    /// Full text of a note, `NotFound` if absent.
    async fn read(&self, name: &str) -> NoteResult<String>;

    /// Store a new note, `AlreadyExists` if the name is taken.
    async fn create(&self, name: &str, text: &str) -> NoteResult<()>;

    /// Replace a note's content.
    async fn write(&self, name: &str, text: &str) -> NoteResult<()>;

    /// Remove a note, `NotFound` if absent.
    async fn delete(&self, name: &str) -> NoteResult<()>;

    /// Names of every stored note, in no particular order.
    async fn list(&self) -> NoteResult<Vec<String>>;
}

/// Backend storing each note as `<root>/<name>.txt`.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open the backend, failing if `root` is not an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> NoteResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(NoteError::RootMissing { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl NoteBackend for FileBackend {
    async fn exists(&self, name: &str) -> NoteResult<bool> {
        let path = file_ops::note_path(&self.root, name);
        file_ops::note_exists(&path)
            .await
            .map_err(|e| NoteError::storage(path, e))
    }

    async fn read(&self, name: &str) -> NoteResult<String> {
        let path = file_ops::note_path(&self.root, name);
        match file_ops::read_note(&path).await {
            Ok(Some(text)) => Ok(text),
            Ok(None) => Err(NoteError::not_found(name)),
            Err(e) => Err(NoteError::storage(path, e)),
        }
    }

    async fn create(&self, name: &str, text: &str) -> NoteResult<()> {
        let path = file_ops::note_path(&self.root, name);
        match file_ops::create_note(&path, text).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(NoteError::already_exists(name))
            }
            Err(e) => Err(NoteError::storage(path, e)),
        }
    }

    async fn write(&self, name: &str, text: &str) -> NoteResult<()> {
        let path = file_ops::note_path(&self.root, name);
        file_ops::write_note(&path, text)
            .await
            .map_err(|e| NoteError::storage(path, e))
    }

    async fn delete(&self, name: &str) -> NoteResult<()> {
        let path = file_ops::note_path(&self.root, name);
        match file_ops::delete_note(&path).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NoteError::not_found(name)),
            Err(e) => Err(NoteError::storage(path, e)),
        }
    }

    async fn list(&self) -> NoteResult<Vec<String>> {
        file_ops::list_notes(&self.root)
            .await
            .map_err(|e| NoteError::storage(self.root.clone(), e))
    }
}
