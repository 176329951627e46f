//! Durable storage for the whitelisted form projection
//!
//! Only field values and the mode are ever written. Touch marks and errors
//! are rebuilt from fresh interaction after every reload.

use super::field::{FieldValue, FormSnapshot};
use super::schema::FormMode;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode persisted record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key/value store shaped like browser session storage
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Storage for contexts without a durable store: reads find nothing, writes vanish
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl SessionStorage for NoopStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// In-process storage; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a session directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// The persisted record: `{ <field>: value, ..., "mode": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub mode: FormMode,
    #[serde(flatten)]
    pub values: BTreeMap<String, FieldValue>,
}

/// Writes the whitelisted projection through to a storage adapter
pub struct PersistenceScope {
    key: String,
    storage: Box<dyn SessionStorage>,
}

impl std::fmt::Debug for PersistenceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceScope")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl PersistenceScope {
    pub fn new(key: impl Into<String>, storage: Box<dyn SessionStorage>) -> Self {
        Self {
            key: key.into(),
            storage,
        }
    }

    /// Write the projection. Failures are logged and swallowed.
    pub fn write(&mut self, values: &FormSnapshot, mode: FormMode) {
        let record = PersistedRecord {
            mode,
            values: values.clone().into_inner(),
        };
        let result = serde_json::to_string(&record)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(&self.key, &json));
        match result {
            Ok(()) => tracing::trace!(key = %self.key, "persisted form projection"),
            Err(err) => tracing::warn!(key = %self.key, "failed to persist form projection: {err}"),
        }
    }

    /// Read the projection, ignoring records that cannot be decoded
    pub fn read(&self) -> Option<PersistedRecord> {
        let raw = self.storage.get_item(&self.key)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(key = %self.key, "ignoring unreadable persisted record: {err}");
                None
            }
        }
    }

    /// Drop the record, e.g. once the form has been submitted
    pub fn clear(&mut self) {
        if let Err(err) = self.storage.remove_item(&self.key) {
            tracing::warn!(key = %self.key, "failed to clear persisted record: {err}");
        }
    }
}
