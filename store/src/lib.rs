//! Local storage for AIDchain.
//!
//! The only durable state is a flat key-value namespace holding JSON record
//! lists under fixed keys. Every backend (LMDB, in-memory for testing)
//! implements [`KeyValueStore`]; the rest of the codebase goes through the
//! typed, versioned [`RecordStore`] on top of it.

pub mod error;
pub mod keys;
pub mod kv;
pub mod persistence;
pub mod records;

pub use error::StoreError;
pub use kv::KeyValueStore;
pub use persistence::Persistence;
pub use records::{decode_list, RecordStore, CURRENT_VERSION};
