//! JSON values over a string key-value store
//!
//! The browser's `localStorage` is one implementation of [`KeyValueBackend`];
//! [`MemoryBackend`] is another. [`JsonStorage`] layers JSON encoding on top
//! and offers two flavours of every operation: `try_*` returns the error,
//! the plain form logs it and degrades to an empty result.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Failure reported by a raw key-value backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to parse stored value for '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Synchronous string-keyed storage (get/set/remove of raw strings).
pub trait KeyValueBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError>;
    fn remove_item(&self, key: &str) -> Result<(), BackendError>;
}

/// In-process backend with an optional quota on total stored bytes
/// (keys plus values, counted like browsers do).
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError> {
        if let Some(quota) = self.quota_bytes {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(BackendError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), BackendError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// JSON-encoding wrapper over a [`KeyValueBackend`]. Last write wins.
pub struct JsonStorage<B> {
    backend: B,
}

impl<B: KeyValueBackend> JsonStorage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &json)?;
        debug!("Stored '{}' ({} bytes)", key, json.len());
        Ok(())
    }

    /// `Ok(None)` when the key is absent or holds an empty string.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let raw = match self.backend.get_item(key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Deserialize {
                key: key.to_string(),
                source,
            })
    }

    pub fn try_remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove_item(key)?;
        Ok(())
    }

    /// Store `value`, logging instead of failing. Returns whether it was written.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving to storage: {}", e);
                false
            }
        }
    }

    /// Store text the caller already encoded as JSON, keeping it byte for
    /// byte. `None` (a value with no JSON form) clears the key, so a later
    /// read is absent. Logs instead of failing.
    pub fn store_encoded(&self, key: &str, encoded: Option<&str>) -> bool {
        let Some(json) = encoded else {
            debug!("No JSON form for '{}', clearing it", key);
            return self.remove(key);
        };
        match self.backend.set_item(key, json) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving to storage: {}", e);
                false
            }
        }
    }

    /// Read `key`, treating every failure as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_get(key).unwrap_or_else(|e| {
            error!("Error reading from storage: {}", e);
            None
        })
    }

    /// Delete `key`, logging instead of failing. Returns whether it succeeded.
    pub fn remove(&self, key: &str) -> bool {
        match self.try_remove(key) {
            Ok(()) => true,
            Err(e) => {
                error!("Error removing from storage: {}", e);
                false
            }
        }
    }
}
