//! NoteStore: existence-gated note operations on top of a storage backend.
//!
//! Every operation on a given name runs under that name's lock, so a create
//! racing a delete (or two updates) on the same note are applied one after
//! the other. Different names never wait on each other. Listing takes no
//! locks and returns whatever is present while it runs.

use dashmap::DashMap;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::backend::{FileBackend, NoteBackend};
use super::error::{NoteError, NoteResult};
use super::memory::MemoryBackend;
use super::name;

/// A note as returned by listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub name: String,
    pub text: String,
}

/// Name-addressed store for plain-text notes
pub struct NoteStore {
    backend: Box<dyn NoteBackend>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl NoteStore {
    pub fn new(backend: impl NoteBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            locks: DashMap::new(),
        }
    }

    /// Open a file-backed store rooted at `notes_dir`.
    /// Fails with `RootMissing` if the directory does not exist.
    pub fn open(notes_dir: impl Into<PathBuf>) -> NoteResult<Self> {
        let backend = FileBackend::open(notes_dir)?;
        log::info!("[NOTES] Using notes directory {}", backend.root().display());
        Ok(Self::new(backend))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Create a new note. Fails with `AlreadyExists` if the name is taken.
    pub async fn create(&self, note_name: &str, text: &str) -> NoteResult<()> {
        name::validate(note_name)?;
        let _guard = self.lock_name(note_name).await;

        self.backend.create(note_name, text).await?;
        log::info!("[NOTES] Created note '{}' ({} bytes)", note_name, text.len());
        Ok(())
    }

    /// Full content of a note
    pub async fn read(&self, note_name: &str) -> NoteResult<String> {
        name::validate(note_name)?;
        let _guard = self.lock_name(note_name).await;

        self.backend.read(note_name).await
    }

    /// Replace the whole content of an existing note
    pub async fn update(&self, note_name: &str, text: &str) -> NoteResult<()> {
        name::validate(note_name)?;
        let _guard = self.lock_name(note_name).await;

        if !self.backend.exists(note_name).await? {
            return Err(NoteError::not_found(note_name));
        }
        self.backend.write(note_name, text).await?;
        log::info!("[NOTES] Updated note '{}' ({} bytes)", note_name, text.len());
        Ok(())
    }

    /// Permanently remove a note
    pub async fn delete(&self, note_name: &str) -> NoteResult<()> {
        name::validate(note_name)?;
        let _guard = self.lock_name(note_name).await;

        self.backend.delete(note_name).await?;
        log::info!("[NOTES] Deleted note '{}'", note_name);
        Ok(())
    }

    /// Every stored note with its content. Order is unspecified.
    pub async fn list_all(&self) -> NoteResult<Vec<Note>> {
        let names = self.backend.list().await?;

        let mut notes = Vec::with_capacity(names.len());
        for name in names {
            match self.backend.read(&name).await {
                Ok(text) => notes.push(Note { name, text }),
                // Deleted after the directory was enumerated
                Err(NoteError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(notes)
    }

    async fn lock_name(&self, note_name: &str) -> NameGuard<'_> {
        let mutex = self.locks.entry(note_name.to_string()).or_default().clone();
        let guard = mutex.lock_owned().await;
        NameGuard {
            locks: &self.locks,
            name: note_name.to_string(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn lock_count(&self) -> usize {
        self.locks.len()
    }
}

/// Holds a per-name lock; drops the map entry once nobody else is waiting on it.
struct NameGuard<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    name: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for NameGuard<'_> {
    fn drop(&mut self) {
        // Release the mutex first so its Arc count only reflects the map and waiters
        drop(self.guard.take());
        self.locks
            .remove_if(&self.name, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
