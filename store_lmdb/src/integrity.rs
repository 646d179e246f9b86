//! Startup integrity checks for the local store.
//!
//! Run before any flow touches the store so that corrupted record lists are
//! reported once, up front, instead of silently reading as empty later.

use std::path::Path;

use aidchain_store::{decode_list, keys, KeyValueStore};

use crate::{LmdbError, LmdbKvStore};

/// Summary of an integrity check run.
#[derive(Debug)]
pub struct IntegrityReport {
    pub keys_checked: u32,
    pub total_records: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decode every known record list and count its entries.
///
/// Unreadable lists are recorded in the report rather than causing a hard error.
pub fn check_integrity(store: &LmdbKvStore) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport {
        keys_checked: 0,
        total_records: 0,
        errors: Vec::new(),
    };

    for &key in keys::ALL {
        let bytes = match store.get(key) {
            Ok(Some(bytes)) => bytes,
            // Never written: acceptable for a fresh store.
            Ok(None) => continue,
            Err(e) => {
                report.errors.push(format!("failed to read '{key}': {e}"));
                continue;
            }
        };
        report.keys_checked += 1;
        match decode_list::<serde_json::Value>(key, &bytes) {
            Ok(records) => report.total_records += records.len() as u64,
            Err(e) => report.errors.push(e.to_string()),
        }
    }

    Ok(report)
}

/// Check if the data directory looks valid before opening.
///
/// Returns `Ok(())` for a fresh (nonexistent or empty) directory. Returns an error
/// if the directory exists but `data.mdb` is missing, which suggests
/// corruption or misconfiguration.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let is_empty = path
        .read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false);
    if is_empty {
        return Ok(());
    }
    let data_file = path.join("data.mdb");
    if !data_file.exists() {
        return Err(format!(
            "LMDB directory exists but data.mdb is missing at {}",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEFAULT_MAP_SIZE;
    use crate::LmdbEnvironment;

    #[test]
    fn check_data_dir_fresh_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(&dir.path().join("missing")).is_ok());
    }

    #[test]
    fn check_data_dir_without_data_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(dir.path()).is_ok());
        std::fs::write(dir.path().join("lock.mdb"), b"").unwrap();
        assert!(check_data_dir(dir.path()).is_err());
    }

    #[test]
    fn fresh_store_is_healthy() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        let store = LmdbKvStore::open(&env).unwrap();
        let report = check_integrity(&store).unwrap();
        assert!(report.is_healthy());
        assert_eq!(report.keys_checked, 0);
    }

    #[test]
    fn corrupted_list_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        let store = LmdbKvStore::open(&env).unwrap();
        store.put(keys::DONATIONS, b"[1, 2").unwrap();
        store
            .put(keys::VALIDATIONS, br#"{"version":1,"records":[{},{}]}"#)
            .unwrap();
        let report = check_integrity(&store).unwrap();
        assert!(!report.is_healthy());
        assert_eq!(report.keys_checked, 2);
        assert_eq!(report.total_records, 2);
        assert_eq!(report.errors.len(), 1);
    }
}
