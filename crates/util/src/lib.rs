//! Persistence utilities for Swatch.
//!
//! - [`storage`]: durable key/value text blobs (file and in-memory backends)
//! - [`palette_store`]: the newest-first saved palette collection
//! - [`last_generation`]: snapshot of the latest successful generation

pub mod last_generation;
pub mod palette_store;
pub mod path_processing;
pub mod storage;

pub use last_generation::LastGenerationStore;
pub use palette_store::PaletteStore;
pub use path_processing::expand_tilde;
pub use storage::{FileStorage, InMemoryStorage, KeyValueStorage, StorageError, StorageKey, default_data_dir};
