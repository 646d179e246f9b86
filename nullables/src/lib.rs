//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the flows (clock, storage, wallet, the user's
//! confirmation) sits behind a trait. This crate provides implementations that:
//! - Return deterministic values
//! - Can be scripted and inspected programmatically
//! - Never touch the filesystem, the network or a terminal
//!
//! Usage: inject these instead of the real implementations in tests.

pub mod clock;
pub mod confirmation;
pub mod store;
pub mod wallet;

pub use clock::NullClock;
pub use confirmation::NullConfirmation;
pub use store::NullKvStore;
pub use wallet::NullWalletConnector;
