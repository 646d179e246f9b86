//! The external wallet capability.

use async_trait::async_trait;

use aidchain_types::{TransactionId, WalletAddress};

use crate::error::WalletError;
use crate::transaction_builder::ValueTransfer;

/// Identity and signing, supplied by an external wallet.
///
/// Every method may suspend on user interaction or the network, and every
/// method may fail. Implementations never retry; a failed call is reported
/// once and the user re-triggers the action.
///
/// Implementations include:
/// - [`crate::RpcWalletConnector`], an HTTP JSON-RPC signer bridge
/// - scripted test doubles in `aidchain-nullables`
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Whether a wallet is present at all.
    async fn is_available(&self) -> bool;

    /// Ask the wallet to identify the user. May prompt.
    async fn connect(&self) -> Result<WalletAddress, WalletError>;

    /// The signer the wallet currently exposes, if any.
    async fn current_address(&self) -> Result<Option<WalletAddress>, WalletError>;

    /// Sign and submit a value transfer, resolving once the signer answers.
    async fn submit_value_transfer(
        &self,
        transfer: &ValueTransfer,
    ) -> Result<TransactionId, WalletError>;
}
