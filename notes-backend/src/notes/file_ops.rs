//! File operations for notes system
//!
//! Handles reading/writing plain-text note files and enumerating the notes directory.
//! All functions expect an already validated note name.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::name::{self, NOTE_EXTENSION};

/// Path of the file backing a note: `<notes_dir>/<name>.txt`
pub fn note_path(notes_dir: &Path, name: &str) -> PathBuf {
    notes_dir.join(name::file_name(name))
}

/// Whether a note file exists
pub async fn note_exists(path: &Path) -> io::Result<bool> {
    fs::try_exists(path).await
}

/// Create a note file, failing with `AlreadyExists` if it is already there.
pub async fn create_note(path: &Path, content: &str) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

/// Overwrite a note file with new content
pub async fn write_note(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content.as_bytes()).await
}

/// Read a note file, returning None if not found
pub async fn read_note(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Remove a note file. Returns false if there was nothing to remove.
pub async fn delete_note(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// List the names of all notes in the notes directory (not recursive)
pub async fn list_notes(notes_dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut read_dir = fs::read_dir(notes_dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        if let Some(name) = note_name(&path) {
            // Skip directories named like notes (e.g. "archive.txt/")
            match entry.file_type().await {
                Ok(ft) if ft.is_file() => names.push(name),
                _ => continue,
            }
        }
    }

    Ok(names)
}

/// Note name for a path inside the notes directory, if the path looks like a note file.
/// Files without a `.txt` extension, and stems the API would reject as names
/// (hidden files, backslashes, ...), are ignored.
fn note_name(path: &Path) -> Option<String> {
    if path.extension().map(|e| e != NOTE_EXTENSION).unwrap_or(true) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    name::validate(stem).ok()?;
    Some(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_note_path() {
        let path = note_path(Path::new("/srv/notes"), "groceries");
        assert_eq!(path, PathBuf::from("/srv/notes/groceries.txt"));
    }

    #[tokio::test]
    async fn test_create_and_read_note() {
        let dir = tempdir().unwrap();
        let path = note_path(dir.path(), "hello");

        create_note(&path, "first line\nsecond line").await.unwrap();
        let content = read_note(&path).await.unwrap();
        assert_eq!(content.as_deref(), Some("first line\nsecond line"));
    }

    #[tokio::test]
    async fn test_create_note_is_exclusive() {
        let dir = tempdir().unwrap();
        let path = note_path(dir.path(), "hello");

        create_note(&path, "original").await.unwrap();
        let err = create_note(&path, "replacement").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(read_note(&path).await.unwrap().as_deref(), Some("original"));
    }

    #[tokio::test]
    async fn test_read_note_not_found() {
        let dir = tempdir().unwrap();
        let path = note_path(dir.path(), "nonexistent");
        assert!(read_note(&path).await.unwrap().is_none());
        assert!(!note_exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_write_note_replaces_content() {
        let dir = tempdir().unwrap();
        let path = note_path(dir.path(), "draft");

        write_note(&path, "a much longer first version").await.unwrap();
        write_note(&path, "short").await.unwrap();
        assert_eq!(read_note(&path).await.unwrap().as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn test_delete_note() {
        let dir = tempdir().unwrap();
        let path = note_path(dir.path(), "gone");

        create_note(&path, "bye").await.unwrap();
        assert!(delete_note(&path).await.unwrap());
        assert!(!delete_note(&path).await.unwrap());
        assert!(!note_exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_notes() {
        let dir = tempdir().unwrap();
        let notes_dir = dir.path();

        std::fs::write(notes_dir.join("note1.txt"), "content").unwrap();
        std::fs::write(notes_dir.join("note2.txt"), "").unwrap();
        // Not notes: wrong extension, hidden file, directory
        std::fs::write(notes_dir.join("readme.md"), "markdown").unwrap();
        std::fs::write(notes_dir.join(".hidden.txt"), "secret").unwrap();
        std::fs::create_dir(notes_dir.join("archive.txt")).unwrap();

        let mut names = list_notes(notes_dir).await.unwrap();
        names.sort();
        assert_eq!(names, vec!["note1".to_string(), "note2".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_notes_skips_unaddressable_names() {
        let dir = tempdir().unwrap();
        let notes_dir = dir.path();

        std::fs::write(notes_dir.join("ok.txt"), "fine").unwrap();
        // A valid filename on unix, but not a name the API accepts
        std::fs::write(notes_dir.join("a\\b.txt"), "x").unwrap();

        let names = list_notes(notes_dir).await.unwrap();
        assert_eq!(names, vec!["ok".to_string()]);
    }

    #[tokio::test]
    async fn test_list_notes_missing_dir() {
        let dir = tempdir().unwrap();
        let err = list_notes(&dir.path().join("missing")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
