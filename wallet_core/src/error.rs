use aidchain_types::AidError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("wallet is not installed")]
    NotInstalled,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Rejected(String),

    #[error("signer bridge error: {0}")]
    Rpc(String),

    #[error("invalid signer response: {0}")]
    InvalidResponse(String),
}

impl From<WalletError> for AidError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::NotInstalled => AidError::WalletNotInstalled,
            WalletError::Connection(msg) => AidError::ConnectionFailed(msg),
            WalletError::Rejected(msg) => AidError::TransactionRejected(msg),
            other => AidError::TransactionRejected(other.to_string()),
        }
    }
}
