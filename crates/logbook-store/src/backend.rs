//! Durable key-value backend seam.
//!
//! The partition store only needs string-keyed get/set/remove, so that is the
//! whole trait. [`SledBackend`] persists across restarts; [`MemoryBackend`]
//! is the ephemeral default and the test backend.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;

use crate::error::{Result, StoreError};

/// String-keyed durable store: get/set/remove.
pub trait KvBackend: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map.write().remove(key);
        Ok(())
    }
}

/// Sled-backed durable backend.
///
/// Values survive process restarts; every write is flushed before returning.
#[derive(Debug)]
pub struct SledBackend {
    db: sled::Db,
}

impl SledBackend {
    /// Opens (or creates) a sled database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the database cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { db })
    }
}

impl KvBackend for SledBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match value {
            None => Ok(None),
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| StoreError::Backend(format!("value under '{key}' is not UTF-8: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key, value.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .remove(key)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
