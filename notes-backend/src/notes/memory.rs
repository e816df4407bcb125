use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::backend::NoteBackend;
use super::error::{NoteError, NoteResult};

/// In-memory backend for tests and throwaway instances.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    notes: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteBackend for MemoryBackend {
    async fn exists(&self, name: &str) -> NoteResult<bool> {
        Ok(self.notes.read().contains_key(name))
    }

    async fn read(&self, name: &str) -> NoteResult<String> {
        self.notes
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| NoteError::not_found(name))
    }

    async fn create(&self, name: &str, text: &str) -> NoteResult<()> {
        let mut notes = self.notes.write();
        if notes.contains_key(name) {
            return Err(NoteError::already_exists(name));
        }
        notes.insert(name.to_string(), text.to_string());
        Ok(())
    }

    async fn write(&self, name: &str, text: &str) -> NoteResult<()> {
        self.notes.write().insert(name.to_string(), text.to_string());
        Ok(())
    }

    async fn delete(&self, name: &str) -> NoteResult<()> {
        match self.notes.write().remove(name) {
            Some(_) => Ok(()),
            None => Err(NoteError::not_found(name)),
        }
    }

    async fn list(&self) -> NoteResult<Vec<String>> {
        Ok(self.notes.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_basics() {
        let backend = MemoryBackend::new();

        backend.create("a", "x").await.unwrap();
        assert!(backend.exists("a").await.unwrap());
        assert!(matches!(
            backend.create("a", "y").await,
            Err(NoteError::AlreadyExists { .. })
        ));
        assert_eq!(backend.read("a").await.unwrap(), "x");

        backend.delete("a").await.unwrap();
        assert!(!backend.exists("a").await.unwrap());
        assert!(backend.list().await.unwrap().is_empty());
    }
}
