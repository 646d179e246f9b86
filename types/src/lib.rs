//! Fundamental types for AIDchain.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! wallet addresses, fixed-point token amounts, timestamps, transaction ids,
//! the persisted record shapes, distribution requests, parameters, and the
//! flow-facing error type.

pub mod address;
pub mod amount;
pub mod error;
pub mod params;
pub mod records;
pub mod request;
pub mod time;
pub mod tx;

pub use address::WalletAddress;
pub use amount::{AmountParseError, TokenAmount};
pub use error::AidError;
pub use params::AidParams;
pub use records::{DistributionRecord, DonationRecord, ValidationRecord};
pub use request::{DistributionRequest, RequestStatus, Urgency};
pub use time::{Clock, SystemClock, Timestamp};
pub use tx::TransactionId;
