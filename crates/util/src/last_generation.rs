//! Snapshot of the most recent successful generation.
//!
//! The snapshot is spread over three blobs: the colors as a JSON array, and
//! the prompt and style as plain text.

use std::sync::Arc;

use swatch_types::{GeneratedPalette, Palette, Style};
use tracing::warn;

use crate::storage::{KeyValueStorage, StorageError, StorageKey};

/// Reads and writes the last-generation snapshot.
#[derive(Clone)]
pub struct LastGenerationStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl LastGenerationStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Replace the snapshot with `generated`.
    pub fn save(&self, generated: &GeneratedPalette) -> Result<(), StorageError> {
        let colors = serde_json::to_string(&generated.palette)?;
        self.storage.write(StorageKey::LastGeneratedColors, &colors)?;
        self.storage.write(StorageKey::LastPrompt, &generated.prompt)?;
        self.storage.write(StorageKey::LastStyle, generated.style.as_str())?;
        Ok(())
    }

    /// Load the snapshot, or `None` when no usable colors were stored.
    ///
    /// A missing or unknown style falls back to [`Style::Modern`].
    pub fn load(&self) -> Option<GeneratedPalette> {
        let colors = self.read_text(StorageKey::LastGeneratedColors)?;
        let palette = match serde_json::from_str::<Palette>(&colors) {
            Ok(palette) => palette,
            Err(error) => {
                warn!(error = %error, "Failed to parse last generated colors; ignoring snapshot");
                return None;
            }
        };
        let prompt = self.read_text(StorageKey::LastPrompt).unwrap_or_default();
        let style = self
            .read_text(StorageKey::LastStyle)
            .and_then(|style| style.parse::<Style>().ok())
            .unwrap_or_default();

        Some(GeneratedPalette { palette, prompt, style })
    }

    fn read_text(&self, key: StorageKey) -> Option<String> {
        match self.storage.read(key) {
            Ok(value) => value,
            Err(error) => {
                warn!(key = key.as_str(), error = %error, "Failed to read last generation snapshot");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    fn generated() -> GeneratedPalette {
        GeneratedPalette {
            palette: Palette::from_raw(["#264653", "#2a9d8f", "#e9c46a"]).unwrap(),
            prompt: "desert oasis".into(),
            style: Style::Vintage,
        }
    }

    #[test]
    fn save_then_load_round_trip() {
        let storage = Arc::new(InMemoryStorage::new());
        let snapshots = LastGenerationStore::new(storage.clone());
        snapshots.save(&generated()).unwrap();

        assert_eq!(snapshots.load(), Some(generated()));
        assert_eq!(storage.read(StorageKey::LastPrompt).unwrap().as_deref(), Some("desert oasis"));
        assert_eq!(storage.read(StorageKey::LastStyle).unwrap().as_deref(), Some("vintage"));
        assert_eq!(
            storage.read(StorageKey::LastGeneratedColors).unwrap().as_deref(),
            Some(r##"["#264653","#2a9d8f","#e9c46a"]"##)
        );
    }

    #[test]
    fn missing_colors_means_no_snapshot() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.write(StorageKey::LastPrompt, "orphan prompt").unwrap();
        assert!(LastGenerationStore::new(storage).load().is_none());
    }

    #[test]
    fn corrupt_colors_are_ignored() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.write(StorageKey::LastGeneratedColors, "{broken").unwrap();
        assert!(LastGenerationStore::new(storage).load().is_none());
    }

    #[test]
    fn unknown_style_falls_back_to_default() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.write(StorageKey::LastGeneratedColors, r##"["#000000"]"##).unwrap();
        storage.write(StorageKey::LastStyle, "baroque").unwrap();

        let loaded = LastGenerationStore::new(storage).load().unwrap();
        assert_eq!(loaded.style, Style::Modern);
        assert_eq!(loaded.prompt, "");
    }
}
