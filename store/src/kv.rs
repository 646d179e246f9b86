//! Raw key-value storage trait.

use crate::StoreError;

/// A flat, process-wide key-value namespace.
///
/// Values are opaque bytes; [`crate::RecordStore`] owns the encoding.
/// No transactions span more than one key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrite the value under `key`.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
