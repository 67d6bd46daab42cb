//! Saved palette collection with whole-collection persistence.
//!
//! The store owns the newest-first list of [`SavedPalette`] records. It is
//! hydrated once through [`PaletteStore::load_all`] and every mutation
//! rewrites the complete collection under [`StorageKey::SavedPalettes`].

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::Value;
use swatch_types::{Palette, SavedPalette};
use tracing::{debug, warn};

use crate::storage::{KeyValueStorage, StorageError, StorageKey};

#[derive(Default)]
struct PaletteCollection {
    palettes: Vec<SavedPalette>,
    last_issued_id: i64,
}

impl PaletteCollection {
    fn from_palettes(palettes: Vec<SavedPalette>) -> Self {
        let last_issued_id = palettes
            .iter()
            .filter_map(|saved| saved.id.parse::<i64>().ok())
            .max()
            .unwrap_or_default();
        Self {
            palettes,
            last_issued_id,
        }
    }

    /// Millisecond timestamp, bumped past every id issued or loaded so far.
    fn next_id(&mut self, created_at: DateTime<Utc>) -> String {
        let candidate = created_at.timestamp_millis().max(self.last_issued_id + 1);
        self.last_issued_id = candidate;
        candidate.to_string()
    }
}

/// Saved palette store backed by a [`KeyValueStorage`].
pub struct PaletteStore {
    storage: Arc<dyn KeyValueStorage>,
    collection: Mutex<PaletteCollection>,
}

impl PaletteStore {
    /// Hydrate the store from storage.
    ///
    /// Missing or unparsable data yields an empty collection; read failures
    /// are logged and never returned.
    pub fn load_all(storage: Arc<dyn KeyValueStorage>) -> Self {
        let palettes = read_saved_palettes(storage.as_ref());
        debug!(count = palettes.len(), "loaded saved palettes");
        Self {
            storage,
            collection: Mutex::new(PaletteCollection::from_palettes(palettes)),
        }
    }

    /// Save a copy of `palette` at position 0 and flush the collection.
    ///
    /// When the flush fails the record is still kept in memory and the
    /// storage error is returned.
    pub fn add(&self, palette: &Palette, name: &str, prompt: &str) -> Result<SavedPalette, StorageError> {
        self.add_with_timestamp(palette, name, prompt, Utc::now())
    }

    /// Same as [`Self::add`] with an explicit creation time.
    pub fn add_with_timestamp(
        &self,
        palette: &Palette,
        name: &str,
        prompt: &str,
        created_at: DateTime<Utc>,
    ) -> Result<SavedPalette, StorageError> {
        let mut collection = self.collection.lock().expect("palette store lock poisoned");
        let saved = SavedPalette {
            id: collection.next_id(created_at),
            name: name.to_string(),
            colors: palette.clone(),
            prompt: prompt.to_string(),
            created_at,
        };
        collection.palettes.insert(0, saved.clone());
        debug!(id = %saved.id, colors = saved.colors.len(), "saved palette");
        self.flush_locked(&collection)?;
        Ok(saved)
    }

    /// Remove the entry with `id` and flush the collection.
    ///
    /// Returns `false` when no entry matched; that case is not an error.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut collection = self.collection.lock().expect("palette store lock poisoned");
        let before = collection.palettes.len();
        collection.palettes.retain(|saved| saved.id != id);
        let removed = collection.palettes.len() != before;
        if removed {
            debug!(%id, "removed saved palette");
        }
        self.flush_locked(&collection)?;
        Ok(removed)
    }

    /// Current collection, newest first.
    pub fn palettes(&self) -> Vec<SavedPalette> {
        self.collection.lock().expect("palette store lock poisoned").palettes.clone()
    }

    /// Look up a single entry by id.
    pub fn get(&self, id: &str) -> Option<SavedPalette> {
        let collection = self.collection.lock().expect("palette store lock poisoned");
        collection.palettes.iter().find(|saved| saved.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.collection.lock().expect("palette store lock poisoned").palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn flush_locked(&self, collection: &PaletteCollection) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&collection.palettes)?;
        self.storage.write(StorageKey::SavedPalettes, &content)
    }
}

fn read_saved_palettes(storage: &dyn KeyValueStorage) -> Vec<SavedPalette> {
    let content = match storage.read(StorageKey::SavedPalettes) {
        Ok(Some(content)) => content,
        Ok(None) => return Vec::new(),
        Err(error) => {
            warn!(error = %error, "Failed to read saved palettes; starting empty");
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(records) => records,
        Err(error) => {
            warn!(error = %error, "Failed to parse saved palettes; starting empty");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value::<SavedPalette>(record) {
            Ok(saved) => Some(saved),
            Err(error) => {
                warn!(position, error = %error, "Skipping unreadable saved palette");
                None
            }
        })
        .collect()
}
