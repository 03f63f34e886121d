//! Persistent storage for client-owned collections.
//!
//! Mirrors browser local-storage semantics: each logical collection
//! ("cart", "favorites") is one named key holding a JSON-serialized
//! sequence. A collection is loaded once at mount; every mutation
//! re-serializes and overwrites the whole value. There is no versioning
//! or migration scheme - data that fails to parse is treated as absent,
//! logged, and never surfaced as an error. Last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Key-value persistence for named collections.
///
/// Both operations are total from the caller's perspective: a failed load
/// yields the empty collection, a failed save is logged and dropped.
pub trait CollectionStore {
    /// Load the collection stored under `key`, or its default if the key
    /// is absent or holds an incompatible shape.
    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T;

    /// Serialize `value` and overwrite whatever is stored under `key`.
    fn save<T: Serialize>(&self, key: &str, value: &T);
}

// One store instance backs both collections, so a borrowed store must
// also be usable as a store.
impl<T: CollectionStore> CollectionStore for &T {
    fn load<V: DeserializeOwned + Default>(&self, key: &str) -> V {
        (*self).load(key)
    }

    fn save<V: Serialize>(&self, key: &str, value: &V) {
        (*self).save(key, value);
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed store: one JSON file per collection under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the session data directory: `PETAL_DATA_DIR`
    /// if set, else `.petal` under the current directory.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(default_data_dir())
    }

    /// Create a store rooted at `dir`, creating the directory if needed.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "could not create data directory");
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CollectionStore for FileStore {
    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.path_for(key);
        let Ok(raw) = fs::read_to_string(&path) else {
            // Absent file is the empty collection, not an error.
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "stored collection failed to parse, starting empty");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        let path = self.path_for(key);
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                warn!(key, error = %e, "could not serialize collection");
                return;
            }
        };
        if let Err(e) = fs::write(&path, serialized) {
            warn!(key, path = %path.display(), error = %e, "could not persist collection");
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value under `key`, bypassing serialization. Test helper
    /// for exercising the malformed-data path.
    pub fn seed_raw(&self, key: &str, raw: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }
}

impl CollectionStore for MemoryStore {
    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let entries = self.entries.borrow();
        let Some(raw) = entries.get(key) else {
            return T::default();
        };
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored collection failed to parse, starting empty");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(serialized) = serde_json::to_string(value) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), serialized);
        }
    }
}

/// Well-known collection keys.
pub mod keys {
    /// Cart line items.
    pub const CART: &str = "cart";
    /// Favorited products.
    pub const FAVORITES: &str = "favorites";
}

/// Pick a data directory for the file store: `PETAL_DATA_DIR` if set,
/// else `.petal` under the current directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    data_dir_from(std::env::var_os("PETAL_DATA_DIR"))
}

fn data_dir_from(var: Option<std::ffi::OsString>) -> PathBuf {
    var.map_or_else(|| Path::new(".petal").to_path_buf(), PathBuf::from)
}
