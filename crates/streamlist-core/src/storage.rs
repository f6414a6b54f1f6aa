use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::StorageError;

/// Synchronous, string-keyed, string-valued store with last-write-wins per key
pub trait StorageBackend: Send {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;

    /// Problem encountered while opening the backend, if it had to start empty
    fn load_error(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: items.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        Ok(())
    }
}

/// Key-value store kept as one JSON object on disk.
///
/// Every write rewrites the whole file through a temp file and a rename, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: HashMap<String, String>,
    load_error: Option<String>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if !path.exists() {
            debug!("Local storage file {:?} does not exist, starting empty", path);
            return Ok(Self {
                path,
                items: HashMap::new(),
                load_error: None,
            });
        }

        let bytes = std::fs::read(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        match decode_items(&bytes) {
            Ok(items) => {
                debug!("Loaded {} keys from local storage {:?}", items.len(), path);
                Ok(Self {
                    path,
                    items,
                    load_error: None,
                })
            }
            Err(e) => {
                let backup_path = path.with_extension("json.bak");
                if let Err(backup_err) = std::fs::copy(&path, &backup_path) {
                    warn!(
                        "Local storage {:?} is corrupt ({}) and could not be backed up: {}",
                        path, e, backup_err
                    );
                } else {
                    info!(
                        "Local storage {:?} is corrupt ({}). Backed up to {:?} and starting empty.",
                        path, e, backup_path
                    );
                }
                Ok(Self {
                    path,
                    items: HashMap::new(),
                    load_error: Some(format!("local storage file is corrupt: {}", e)),
                })
            }
        }
    }

    fn flush(&self) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&self.items)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(write_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(write_err)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.flush()
    }

    fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

/// Bytes on disk to the key map; invalid UTF-8 and invalid JSON are both corruption
fn decode_items(bytes: &[u8]) -> Result<HashMap<String, String>, String> {
    let content = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
    serde_json::from_str(content).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("local_storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item("darkMode", "true").unwrap();
        storage.set_item("movieSearchQuery", "alien").unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("darkMode").as_deref(), Some("true"));
        assert_eq!(reopened.get_item("movieSearchQuery").as_deref(), Some("alien"));
        assert!(reopened.load_error().is_none());
    }

    #[test]
    fn test_corrupt_file_is_backed_up_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("streamList"), None);
        assert!(storage.load_error().is_some());
        assert_eq!(
            std::fs::read_to_string(path.with_extension("json.bak")).unwrap(),
            "{not json"
        );
    }

    #[test]
    fn test_non_utf8_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, [0xff, 0xfe, 0x7b]).unwrap();

        let mut storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("streamList"), None);
        assert!(storage.load_error().unwrap().contains("corrupt"));
        assert_eq!(std::fs::read(path.with_extension("json.bak")).unwrap(), vec![0xff, 0xfe, 0x7b]);

        storage.set_item("darkMode", "true").unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("darkMode").as_deref(), Some("true"));
        assert!(reopened.load_error().is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.remove_item("a").unwrap();
        assert_eq!(FileStorage::open(&path).unwrap().get_item("a"), None);

        storage.clear().unwrap();
        assert_eq!(FileStorage::open(&path).unwrap().get_item("b"), None);
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::with_items([("k", "v")]);
        assert_eq!(storage.get_item("k").as_deref(), Some("v"));
        storage.set_item("k", "w").unwrap();
        assert_eq!(storage.get_item("k").as_deref(), Some("w"));
        storage.clear().unwrap();
        assert_eq!(storage.get_item("k"), None);
    }
}
