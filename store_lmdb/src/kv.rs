//! LMDB implementation of KeyValueStore.

use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env};

use aidchain_store::{KeyValueStore, StoreError};

use crate::{LmdbEnvironment, LmdbError};

/// Name of the single database holding the namespace.
pub(crate) const RECORDS_DB: &str = "records";

pub struct LmdbKvStore {
    env: Arc<Env>,
    records_db: Database<Str, Bytes>,
}

impl LmdbKvStore {
    /// Open (creating if needed) the records database in `environment`.
    pub fn open(environment: &LmdbEnvironment) -> Result<Self, LmdbError> {
        let env = environment.env().clone();
        let mut wtxn = env.write_txn()?;
        let records_db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(RECORDS_DB))?;
        wtxn.commit()?;
        Ok(Self { env, records_db })
    }
}

impl KeyValueStore for LmdbKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self
            .records_db
            .get(&rtxn, key)
            .map_err(LmdbError::from)?
            .map(|bytes| bytes.to_vec());
        Ok(value)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.records_db
            .put(&mut wtxn, key, value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.records_db
            .delete(&mut wtxn, key)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
