use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use streamlist_config::PathManager;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::storage::{FileStorage, MemoryStorage, StorageBackend};

pub const STREAM_LIST_KEY: &str = "streamList";
pub const WATCHED_MOVIES_KEY: &str = "watchedMovies";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const SEARCH_QUERY_KEY: &str = "movieSearchQuery";

/// Shared handle over a storage backend that speaks JSON values.
///
/// Reads tolerate missing keys and hand malformed values back as a typed
/// error; writes never fail from the caller's point of view.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<Mutex<Box<dyn StorageBackend>>>,
}

impl PersistentStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(Mutex::new(Box::new(backend))),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Open the file-backed store under the data directory
    pub fn open(path_manager: &PathManager) -> Result<Self, StorageError> {
        let storage = FileStorage::open(path_manager.local_storage_file())?;
        Ok(Self::new(storage))
    }

    fn backend(&self) -> MutexGuard<'_, Box<dyn StorageBackend>> {
        // A panic while holding the lock cannot leave the map half-written
        self.backend.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Decode the JSON stored under `key`, or `default` when the key is absent
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, StorageError> {
        let Some(raw) = self.read_raw(key) else {
            debug!("Storage miss: {}", key);
            return Ok(default);
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
    }

    /// Encode `value` as JSON and store it under `key`
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write_raw(key, &json),
            Err(e) => warn!("Failed to encode value for {}: {}", key, e),
        }
    }

    pub fn read_raw(&self, key: &str) -> Option<String> {
        self.backend().get_item(key)
    }

    pub fn write_raw(&self, key: &str, value: &str) {
        if let Err(e) = self.backend().set_item(key, value) {
            warn!("Failed to persist {}: {}", key, e);
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend().clear()
    }

    pub fn load_error(&self) -> Option<String> {
        self.backend().load_error().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_missing_keys_yield_defaults() {
        let store = PersistentStore::in_memory();
        let list: Vec<u64> = store.read(STREAM_LIST_KEY, Vec::new()).unwrap();
        let flags: BTreeMap<u64, bool> = store.read(WATCHED_MOVIES_KEY, BTreeMap::new()).unwrap();
        let dark: bool = store.read(DARK_MODE_KEY, false).unwrap();
        assert!(list.is_empty());
        assert!(flags.is_empty());
        assert!(!dark);
    }

    #[test]
    fn test_malformed_value_is_an_error_not_a_panic() {
        let store = PersistentStore::new(MemoryStorage::with_items([(STREAM_LIST_KEY, "[{oops")]));
        let result: Result<Vec<u64>, _> = store.read(STREAM_LIST_KEY, Vec::new());
        match result {
            Err(StorageError::Malformed { key, .. }) => assert_eq!(key, STREAM_LIST_KEY),
            other => panic!("expected malformed error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_integer_keyed_map_uses_string_keys() {
        let store = PersistentStore::in_memory();
        let mut flags = BTreeMap::new();
        flags.insert(7_u64, true);
        store.write(WATCHED_MOVIES_KEY, &flags);

        assert_eq!(store.read_raw(WATCHED_MOVIES_KEY).as_deref(), Some(r#"{"7":true}"#));
        let loaded: BTreeMap<u64, bool> = store.read(WATCHED_MOVIES_KEY, BTreeMap::new()).unwrap();
        assert_eq!(loaded, flags);
    }

    #[test]
    fn test_clones_share_the_backend() {
        let store = PersistentStore::in_memory();
        let other = store.clone();
        store.write_raw(SEARCH_QUERY_KEY, "heat");
        assert_eq!(other.read_raw(SEARCH_QUERY_KEY).as_deref(), Some("heat"));
        other.write_raw(SEARCH_QUERY_KEY, "ronin");
        assert_eq!(store.read_raw(SEARCH_QUERY_KEY).as_deref(), Some("ronin"));
    }
}
