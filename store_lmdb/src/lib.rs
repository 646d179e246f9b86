//! LMDB storage backend for AIDchain.
//!
//! Implements [`aidchain_store::KeyValueStore`] using the `heed` LMDB bindings.
//! The whole namespace lives in one named database inside a single environment.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod kv;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use kv::LmdbKvStore;
