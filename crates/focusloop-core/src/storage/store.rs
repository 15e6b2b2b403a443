//! Key-value store abstraction.
//!
//! Everything the app persists is a JSON blob under a string key. Any
//! embedding that can honor the `get_raw`/`set_raw` contract works: the
//! SQLite-backed [`Database`](super::Database) is the durable default,
//! [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::sync::Mutex;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// String-keyed blob store with a synchronous get/set contract.
pub trait KvStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read and decode a JSON value.
    ///
    /// A missing key, a read failure, or a corrupt blob all yield `None` --
    /// callers substitute their documented default (first-run semantics).
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get_raw(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("read of '{key}' failed, treating as first run: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("corrupt blob under '{key}', treating as first run: {e}");
                None
            }
        }
    }

    /// Encode and write a JSON value.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> crate::Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)?;
        Ok(())
    }
}

/// In-memory store for tests and storage-less embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .map
            .lock()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .map
            .lock()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        n: u32,
    }

    #[test]
    fn missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get_json::<Blob>("absent").is_none());
    }

    #[test]
    fn json_roundtrip() {
        let store = MemoryStore::new();
        store.set_json("blob", &Blob { n: 7 }).unwrap();
        assert_eq!(store.get_json::<Blob>("blob"), Some(Blob { n: 7 }));
    }

    #[test]
    fn corrupt_blob_is_none() {
        let store = MemoryStore::new();
        store.set_raw("blob", "{not json").unwrap();
        assert!(store.get_json::<Blob>("blob").is_none());
    }
}
