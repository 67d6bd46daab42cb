//! Durable key/value text storage.
//!
//! Every persisted value is a whole text blob addressed by a [`StorageKey`].
//! Writers always replace the blob in full; there are no partial or merge
//! writes. [`FileStorage`] keeps one file per key under a data directory and
//! [`InMemoryStorage`] backs tests and the ephemeral fallback.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::config_dir;
use thiserror::Error;
use tracing::debug;

use crate::expand_tilde;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SWATCH_DATA_DIR";

/// Directory name created under the platform config directory.
pub const DATA_DIR_NAME: &str = "swatch";

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O failure while reading or writing a blob.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Keys of the persisted blobs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StorageKey {
    /// JSON array of saved palettes, newest first.
    SavedPalettes,
    /// JSON array of the colors from the most recent successful generation.
    LastGeneratedColors,
    /// Prompt text of the most recent successful generation.
    LastPrompt,
    /// Style identifier of the most recent successful generation.
    LastStyle,
}

impl StorageKey {
    /// Logical key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SavedPalettes => "savedPalettes",
            Self::LastGeneratedColors => "lastGeneratedColors",
            Self::LastPrompt => "lastPrompt",
            Self::LastStyle => "lastStyle",
        }
    }

    /// File name used by [`FileStorage`].
    pub fn file_name(self) -> &'static str {
        match self {
            Self::SavedPalettes => "saved_palettes.json",
            Self::LastGeneratedColors => "last_generated_colors.json",
            Self::LastPrompt => "last_prompt.txt",
            Self::LastStyle => "last_style.txt",
        }
    }
}

/// Shared trait implemented by storage backends.
pub trait KeyValueStorage: Send + Sync {
    /// Read the blob stored under `key`, or `None` when nothing was written yet.
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;
}

/// Directory-backed storage with one file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage rooted at [`default_data_dir`].
    pub fn with_defaults() -> Self {
        Self::new(default_data_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file backing `key`.
    pub fn path_for(&self, key: StorageKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        write_atomic(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "wrote storage blob");
        Ok(())
    }
}

/// In-memory storage primarily used for unit testing.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    blobs: Mutex<HashMap<StorageKey, String>>,
}

impl InMemoryStorage {
    /// Create an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let blobs = self.blobs.lock().expect("storage lock poisoned");
        Ok(blobs.get(&key).cloned())
    }

    fn write(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let mut blobs = self.blobs.lock().expect("storage lock poisoned");
        blobs.insert(key, value.to_string());
        Ok(())
    }
}

/// Resolve the data directory from [`DATA_DIR_ENV`] or the platform config directory.
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = env::var(DATA_DIR_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(DATA_DIR_NAME)
}

fn write_atomic(path: &Path, content: &str) -> Result<(), std::io::Error> {
    let temporary_path = path.with_extension(format!(
        "{}.tmp",
        path.extension().and_then(|extension| extension.to_str()).unwrap_or("tmp")
    ));
    fs::write(&temporary_path, content)?;
    fs::rename(&temporary_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_storage_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert!(storage.read(StorageKey::LastPrompt).unwrap().is_none());
        storage.write(StorageKey::LastPrompt, "misty harbor").unwrap();
        assert_eq!(storage.read(StorageKey::LastPrompt).unwrap().as_deref(), Some("misty harbor"));
        assert!(storage.path_for(StorageKey::LastPrompt).exists());
    }

    #[test]
    fn file_storage_replaces_blob_in_full() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.write(StorageKey::SavedPalettes, "[1, 2, 3]").unwrap();
        storage.write(StorageKey::SavedPalettes, "[]").unwrap();
        assert_eq!(storage.read(StorageKey::SavedPalettes).unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("saved_palettes.json.tmp").exists());
    }

    #[test]
    fn in_memory_storage_keeps_keys_apart() {
        let storage = InMemoryStorage::new();
        storage.write(StorageKey::LastPrompt, "dusk").unwrap();
        storage.write(StorageKey::LastStyle, "neon").unwrap();

        assert_eq!(storage.read(StorageKey::LastPrompt).unwrap().as_deref(), Some("dusk"));
        assert_eq!(storage.read(StorageKey::LastStyle).unwrap().as_deref(), Some("neon"));
        assert!(storage.read(StorageKey::SavedPalettes).unwrap().is_none());
    }

    #[test]
    fn default_dir_honors_env_override() {
        temp_env::with_var(DATA_DIR_ENV, Some("/tmp/swatch-data"), || {
            assert_eq!(default_data_dir(), PathBuf::from("/tmp/swatch-data"));
        });
    }

    #[test]
    fn blank_env_override_falls_back_to_config_dir() {
        temp_env::with_var(DATA_DIR_ENV, Some("   "), || {
            assert!(default_data_dir().ends_with(DATA_DIR_NAME));
        });
    }
}
