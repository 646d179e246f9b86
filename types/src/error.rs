//! Flow-facing error type shared across crates.

use thiserror::Error;

use crate::request::RequestStatus;

/// Errors returned by the donation, validation, contribution and distribution flows.
///
/// Input problems (amount, readiness, duplicate validation) are detected before
/// any wallet call. Wallet failures carry the external message verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AidError {
    #[error("wallet extension is not installed")]
    WalletNotInstalled,

    #[error("wallet connection failed: {0}")]
    ConnectionFailed(String),

    #[error("invalid donation amount: {0}")]
    InvalidAmount(String),

    #[error("transaction rejected: {0}")]
    TransactionRejected(String),

    #[error("{address} has already validated request {request_id}")]
    AlreadyValidated { request_id: String, address: String },

    #[error("request {request_id} is not ready for distribution (status: {status})")]
    NotReady {
        request_id: String,
        status: RequestStatus,
    },

    #[error("unknown distribution request: {0}")]
    UnknownRequest(String),

    #[error("request {0} has already been distributed")]
    RequestClosed(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Only ever logged or reported as degraded persistence; flows do not fail with it.
    #[error("local storage unavailable: {0}")]
    StorageUnavailable(String),
}
