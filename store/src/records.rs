//! Typed, versioned record lists on top of a [`KeyValueStore`].
//!
//! Each key holds `{"version": N, "records": [...]}`. A bare JSON array is the
//! pre-versioning layout and is read as version 0.
//!
//! Reads fail soft: [`RecordStore::read_all`] logs and returns an empty list
//! on any backend or decode error. Writes return their error so the caller
//! can report degraded persistence.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{KeyValueStore, StoreError};

/// Version tag written with every record list.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u32,
    records: &'a [T],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredList<T> {
    Versioned { version: u32, records: Vec<T> },
    Legacy(Vec<T>),
}

/// Record lists keyed by name, with appends serialised per key.
pub struct RecordStore {
    kv: Arc<dyn KeyValueStore>,
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RecordStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The backing key-value store.
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.key_locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Read every record under `key`, surfacing errors.
    pub fn try_read_all<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        let Some(bytes) = self.kv.get(key)? else {
            return Ok(Vec::new());
        };
        decode_list(key, &bytes)
    }

    /// Read every record under `key`; an unreadable list reads as empty.
    pub fn read_all<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.try_read_all(key) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read records, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append one record to the list under `key`.
    ///
    /// If the existing list cannot be read, nothing is written and the read
    /// error is returned. Stored records are never overwritten by an append.
    pub fn append<T>(&self, key: &str, record: &T) -> Result<(), StoreError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let lock = self.key_lock(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records: Vec<T> = self.try_read_all(key)?;
        records.push(record.clone());
        self.write(key, &records)
    }

    /// Overwrite the list under `key` with `records` in one write.
    pub fn replace_all<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StoreError> {
        let lock = self.key_lock(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write(key, records)
    }

    /// Remove the list under `key`.
    pub fn clear(&self, key: &str) -> Result<(), StoreError> {
        let lock = self.key_lock(key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.kv.delete(key)
    }

    fn write<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StoreError> {
        let envelope = Envelope {
            version: CURRENT_VERSION,
            records,
        };
        let bytes = serde_json::to_vec(&envelope)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.kv.put(key, &bytes)?;
        tracing::debug!(key, count = records.len(), "record list written");
        Ok(())
    }
}

/// Decode a stored record list (versioned or legacy layout).
pub fn decode_list<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<Vec<T>, StoreError> {
    let stored: StoredList<T> =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Corruption {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
    match stored {
        StoredList::Versioned { version, records } if version <= CURRENT_VERSION => Ok(records),
        StoredList::Versioned { version, .. } => Err(StoreError::UnsupportedVersion {
            key: key.to_string(),
            version,
        }),
        StoredList::Legacy(records) => Ok(records),
    }
}
