//! User display settings, persisted through an injected key-value store.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const DARK_MODE_KEY: &str = "darkMode";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object of string values in a single file. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        let raw = serde_json::to_string_pretty(&entries).map_err(StoreError::Encode)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(&self.path, raw).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub dark_mode: bool,
}

impl Settings {
    /// Anything other than the exact string `"true"` reads as light mode.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, StoreError> {
        let dark_mode = store.get(DARK_MODE_KEY)?.as_deref() == Some("true");
        Ok(Self { dark_mode })
    }

    pub fn save(&self, store: &impl KeyValueStore) -> Result<(), StoreError> {
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })
    }

    /// Flip dark mode, persist it, and return the new value.
    pub fn toggle_dark_mode(&mut self, store: &impl KeyValueStore) -> Result<bool, StoreError> {
        self.dark_mode = !self.dark_mode;
        self.save(store)?;
        Ok(self.dark_mode)
    }
}
