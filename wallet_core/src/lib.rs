//! Wallet side of AIDchain.
//!
//! The core never signs anything itself. Everything that needs an identity or
//! a signature goes through an injected [`WalletConnector`]:
//! - Capability trait for the external wallet (availability, connect, current
//!   signer, value-transfer submission)
//! - Signer resolution shared by every flow
//! - Value-transfer construction for the donation contract
//! - A JSON-RPC connector for an external signer bridge
//! - Block explorer links
//! - The confirmation gate for irreversible local actions

pub mod confirmation;
pub mod connector;
pub mod error;
pub mod explorer;
pub mod rpc;
pub mod signer;
pub mod transaction_builder;

pub use confirmation::{AutoConfirm, ConfirmationGate};
pub use connector::WalletConnector;
pub use error::WalletError;
pub use explorer::explorer_url;
pub use rpc::RpcWalletConnector;
pub use signer::{best_effort_signer, connect_wallet, resolve_signer};
pub use transaction_builder::{build_donation_transfer, DonationPayload, ValueTransfer};
