//! Durable string key/value storage.
//!
//! Everything the tutor remembers between sessions (solved exercises, theme,
//! last section) goes through [`KeyValueStore`]. Native builds keep a JSON
//! file, the web build uses `window.localStorage`, tests use [`MemoryStore`].

use std::collections::BTreeMap;

use crate::error::StoreError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use super::KeyValueStore;
    use crate::error::StoreError;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// JSON object on disk, rewritten on every `set`.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        entries: BTreeMap<String, String>,
    }

    impl FileStore {
        /// Opens the store, starting empty when the file does not exist yet.
        pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
            let path = path.into();
            let entries = match fs::read_to_string(&path) {
                Ok(json) if json.trim().is_empty() => BTreeMap::new(),
                Ok(json) => serde_json::from_str(&json)?,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
                Err(err) => return Err(err.into()),
            };
            log::info!("store opened at {} ({} keys)", path.display(), entries.len());
            Ok(Self { path, entries })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(&self.entries)?;
            let tmp = self.path.with_extension("json.tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.entries.get(key).map(String::as_str) == Some(value) {
                return Ok(());
            }
            let previous = self.entries.insert(key.to_string(), value.to_string());
            if let Err(err) = self.flush() {
                match previous {
                    Some(old) => self.entries.insert(key.to_string(), old),
                    None => self.entries.remove(key),
                };
                return Err(err);
            }
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use super::KeyValueStore;
    use crate::error::StoreError;

    /// `window.localStorage`, scoped by the page origin.
    pub struct LocalStorageStore {
        storage: web_sys::Storage,
    }

    impl LocalStorageStore {
        pub fn open() -> Result<Self, StoreError> {
            let window = web_sys::window().ok_or(StoreError::Unavailable)?;
            let storage = window
                .local_storage()
                .map_err(|_| StoreError::Unavailable)?
                .ok_or(StoreError::Unavailable)?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for LocalStorageStore {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.storage
                .set_item(key, value)
                .map_err(|_| StoreError::Rejected(key.to_string()))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("darkMode"), None);
        store.set("darkMode", "false").unwrap();
        assert_eq!(store.get("darkMode").as_deref(), Some("false"));
        store.set("darkMode", "true").unwrap();
        assert_eq!(store.get("darkMode").as_deref(), Some("true"));
        assert_eq!(store.len(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod file {
        use super::super::*;
        use std::fs;

        #[test]
        fn missing_file_opens_empty() {
            let dir = tempfile::tempdir().unwrap();
            let store = FileStore::open(dir.path().join("store.json")).unwrap();
            assert_eq!(store.get("exercise-lambda-1"), None);
        }

        #[test]
        fn values_survive_reopen() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("store.json");
            {
                let mut store = FileStore::open(&path).unwrap();
                store.set("exercise-lambda-1", "true").unwrap();
                store.set("activeSection", "3").unwrap();
            }
            let store = FileStore::open(&path).unwrap();
            assert_eq!(store.path(), path.as_path());
            assert!(path.exists());
            assert_eq!(store.get("exercise-lambda-1").as_deref(), Some("true"));
            assert_eq!(store.get("activeSection").as_deref(), Some("3"));
        }

        #[test]
        fn corrupt_file_is_reported() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("store.json");
            fs::write(&path, "{ not json").unwrap();
            assert!(matches!(FileStore::open(&path), Err(StoreError::Json(_))));
        }

        #[test]
        fn failed_write_leaves_memory_unchanged() {
            let dir = tempfile::tempdir().unwrap();
            // A directory where the file should be makes the rename fail.
            let path = dir.path().join("store.json");
            let mut store = FileStore::open(&path).unwrap();
            fs::create_dir_all(path.join("blocker")).unwrap();
            assert!(store.set("exercise-x", "true").is_err());
            assert_eq!(store.get("exercise-x"), None);
        }
    }
}
