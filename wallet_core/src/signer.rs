//! Resolving who is signing.

use aidchain_types::{AidError, WalletAddress};

use crate::connector::WalletConnector;
use crate::error::WalletError;

/// Connect the wallet and return the identified address.
pub async fn connect_wallet<C>(connector: &C) -> Result<WalletAddress, AidError>
where
    C: WalletConnector + ?Sized,
{
    if !connector.is_available().await {
        return Err(AidError::WalletNotInstalled);
    }
    connector.connect().await.map_err(|e| match e {
        WalletError::NotInstalled => AidError::WalletNotInstalled,
        other => AidError::ConnectionFailed(connection_message(other)),
    })
}

/// The current signer, connecting first if the wallet has none.
///
/// A failing `current_address` is treated like "no signer yet" and falls
/// through to an interactive connect.
pub async fn resolve_signer<C>(connector: &C) -> Result<WalletAddress, AidError>
where
    C: WalletConnector + ?Sized,
{
    if !connector.is_available().await {
        return Err(AidError::WalletNotInstalled);
    }
    match connector.current_address().await {
        Ok(Some(address)) => return Ok(address),
        Ok(None) => {}
        Err(e) => tracing::debug!(error = %e, "current address lookup failed, connecting"),
    }
    connect_wallet(connector).await
}

/// The current signer, or the `unknown` sentinel. Never prompts, never fails.
pub async fn best_effort_signer<C>(connector: &C) -> WalletAddress
where
    C: WalletConnector + ?Sized,
{
    if !connector.is_available().await {
        return WalletAddress::unknown();
    }
    match connector.current_address().await {
        Ok(Some(address)) => address,
        Ok(None) => WalletAddress::unknown(),
        Err(e) => {
            tracing::warn!(error = %e, "could not resolve signer, recording as unknown");
            WalletAddress::unknown()
        }
    }
}

fn connection_message(e: WalletError) -> String {
    match e {
        WalletError::Connection(msg) | WalletError::Rejected(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction_builder::ValueTransfer;
    use aidchain_types::TransactionId;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeWallet {
        available: bool,
        current: Result<Option<WalletAddress>, WalletError>,
        connect: Result<WalletAddress, WalletError>,
        connects: AtomicU32,
    }

    #[async_trait]
    impl WalletConnector for FakeWallet {
        async fn is_available(&self) -> bool {
            self.available
        }

        async fn connect(&self) -> Result<WalletAddress, WalletError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            self.connect.clone()
        }

        async fn current_address(&self) -> Result<Option<WalletAddress>, WalletError> {
            self.current.clone()
        }

        async fn submit_value_transfer(
            &self,
            _transfer: &ValueTransfer,
        ) -> Result<TransactionId, WalletError> {
            Err(WalletError::Rejected("not used".into()))
        }
    }

    fn addr(n: u8) -> WalletAddress {
        WalletAddress::parse(&format!("0x{}", format!("{n:02x}").repeat(20))).unwrap()
    }

    fn wallet(
        available: bool,
        current: Result<Option<WalletAddress>, WalletError>,
        connect: Result<WalletAddress, WalletError>,
    ) -> FakeWallet {
        FakeWallet {
            available,
            current,
            connect,
            connects: AtomicU32::new(0),
        }
    }

    #[tokio::test]
    async fn missing_wallet_is_not_installed() {
        let w = wallet(false, Ok(Some(addr(1))), Ok(addr(1)));
        assert_eq!(resolve_signer(&w).await, Err(AidError::WalletNotInstalled));
        assert_eq!(connect_wallet(&w).await, Err(AidError::WalletNotInstalled));
        assert!(best_effort_signer(&w).await.is_unknown());
    }

    #[tokio::test]
    async fn current_address_skips_connect() {
        let w = wallet(true, Ok(Some(addr(1))), Ok(addr(2)));
        assert_eq!(resolve_signer(&w).await, Ok(addr(1)));
        assert_eq!(w.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_current_address_connects() {
        let w = wallet(true, Ok(None), Ok(addr(2)));
        assert_eq!(resolve_signer(&w).await, Ok(addr(2)));
        assert_eq!(w.connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connect_failure_is_connection_failed() {
        let w = wallet(true, Ok(None), Err(WalletError::Connection("user closed".into())));
        assert_eq!(
            resolve_signer(&w).await,
            Err(AidError::ConnectionFailed("user closed".into()))
        );
    }

    #[tokio::test]
    async fn best_effort_falls_back_to_unknown() {
        let w = wallet(true, Err(WalletError::Rpc("down".into())), Ok(addr(2)));
        assert!(best_effort_signer(&w).await.is_unknown());
        assert_eq!(w.connects.load(Ordering::SeqCst), 0);
    }
}
