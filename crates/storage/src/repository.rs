use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tutor_core::model::CompletionMap;

use crate::codec::{decode_completion, encode_completion};

/// Storage key used when no other key is configured.
pub const DEFAULT_PROGRESS_KEY: &str = "pythonTutorProgress";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the persisted completion map.
///
/// Each key names one slot holding the whole map; writes always replace the
/// slot with the complete map.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Load the completion map stored under `key`.
    ///
    /// Returns `Ok(None)` when the slot has never been written or holds a
    /// blank value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is malformed,
    /// or other storage errors.
    async fn load_completion(&self, key: &str) -> Result<Option<CompletionMap>, StorageError>;

    /// Replace the slot under `key` with the full map.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the map cannot be stored.
    async fn save_completion(&self, key: &str, map: &CompletionMap) -> Result<(), StorageError>;

    /// Remove the slot under `key`. Missing slots are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be removed.
    async fn clear_completion(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Slots hold the encoded JSON text, same as the durable backends.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Write a raw slot value, bypassing the codec.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.into());
        Ok(())
    }

    /// Read a raw slot value, bypassing the codec.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn load_completion(&self, key: &str) -> Result<Option<CompletionMap>, StorageError> {
        match self.get_raw(key)? {
            Some(raw) => decode_completion(&raw),
            None => Ok(None),
        }
    }

    async fn save_completion(&self, key: &str, map: &CompletionMap) -> Result<(), StorageError> {
        let encoded = encode_completion(map)?;
        self.put_raw(key, encoded)
    }

    async fn clear_completion(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn CompletionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn CompletionRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
