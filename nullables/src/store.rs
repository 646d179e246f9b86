//! Nullable store: thread-safe in-memory key-value storage for testing.

use aidchain_store::{KeyValueStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// An in-memory [`KeyValueStore`] with failure injection.
///
/// Thread-safe for use with tokio's multi-threaded runtime.
#[derive(Debug, Default)]
pub struct NullKvStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl NullKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `put`/`delete` fail, as a full or revoked
    /// storage area would.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Write raw bytes directly, bypassing failure injection.
    pub fn insert_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.into());
    }

    /// Read raw bytes directly, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

impl KeyValueStore for NullKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(format!("read of {key} failed")));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("quota exceeded".into()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("quota exceeded".into()));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let store = NullKvStore::new();
        store.put("k", b"v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v".to_vec()));
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn injected_failures() {
        let store = NullKvStore::new();
        store.insert_raw("k", "v");
        store.fail_reads(true);
        assert!(store.get("k").is_err());
        store.fail_writes(true);
        assert!(store.put("k", b"w").is_err());
        assert_eq!(store.raw("k"), Some(b"v".to_vec()));
    }
}
