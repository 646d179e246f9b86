use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("stored data is corrupted under key '{key}': {reason}")]
    Corruption { key: String, reason: String },

    #[error("record list under key '{key}' has unsupported version {version}")]
    UnsupportedVersion { key: String, version: u32 },
}

impl From<StoreError> for aidchain_types::AidError {
    fn from(e: StoreError) -> Self {
        aidchain_types::AidError::StorageUnavailable(e.to_string())
    }
}
