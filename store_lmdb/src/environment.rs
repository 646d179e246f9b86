//! LMDB environment setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use heed::{Env, EnvOpenOptions};

use crate::LmdbError;

/// Default map size: 64 MiB is far more than the record lists ever need.
pub const DEFAULT_MAP_SIZE: usize = 64 * 1024 * 1024;

/// Named databases the environment may hold.
pub(crate) const MAX_DBS: u32 = 4;

/// Wraps the opened LMDB environment.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment in the directory `path`.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per directory by this process
        // and never while another handle to the same files is alive.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };
        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env: Arc::new(env),
            path: path.to_path_buf(),
        })
    }

    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
