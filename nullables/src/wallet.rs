//! Nullable wallet: a scripted [`WalletConnector`] for testing.

use aidchain_types::{TransactionId, WalletAddress};
use aidchain_wallet_core::{ValueTransfer, WalletConnector, WalletError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// A wallet whose answers are scripted up front.
///
/// - `connect()` answers with the configured address (and makes it the
///   current signer), or the configured error.
/// - `submit_value_transfer()` pops the next queued result; when the queue is
///   empty it answers with a generated transaction id.
///
/// Every call is counted and every submitted transfer is recorded.
pub struct NullWalletConnector {
    available: AtomicBool,
    current: Mutex<Option<WalletAddress>>,
    current_error: Mutex<Option<WalletError>>,
    connect_result: Mutex<Result<WalletAddress, WalletError>>,
    submit_results: Mutex<VecDeque<Result<TransactionId, WalletError>>>,
    submitted: Mutex<Vec<ValueTransfer>>,
    connect_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

impl NullWalletConnector {
    /// An installed wallet that will identify as `address` when connected.
    pub fn new(address: WalletAddress) -> Self {
        Self {
            available: AtomicBool::new(true),
            current: Mutex::new(None),
            current_error: Mutex::new(None),
            connect_result: Mutex::new(Ok(address)),
            submit_results: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            connect_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
        }
    }

    /// An installed wallet that is already connected as `address`.
    pub fn connected(address: WalletAddress) -> Self {
        let wallet = Self::new(address.clone());
        wallet.set_current(Some(address));
        wallet
    }

    /// No wallet installed.
    pub fn unavailable() -> Self {
        let wallet = Self::new(WalletAddress::unknown());
        wallet.available.store(false, Ordering::SeqCst);
        wallet
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Switch the account the wallet currently exposes.
    pub fn set_current(&self, address: Option<WalletAddress>) {
        *self.current.lock().unwrap() = address;
    }

    /// Make `current_address()` fail until cleared with `None`.
    pub fn fail_current_address(&self, error: Option<WalletError>) {
        *self.current_error.lock().unwrap() = error;
    }

    pub fn set_connect_result(&self, result: Result<WalletAddress, WalletError>) {
        *self.connect_result.lock().unwrap() = result;
    }

    /// Queue the answer for the next submission.
    pub fn push_submit_result(&self, result: Result<TransactionId, WalletError>) {
        self.submit_results.lock().unwrap().push_back(result);
    }

    /// Queue a successful submission returning `tx_id`.
    pub fn accept_next(&self, tx_id: &str) {
        if let Some(id) = TransactionId::new(tx_id) {
            self.push_submit_result(Ok(id));
        }
    }

    /// Queue a rejected submission with `message`.
    pub fn reject_next(&self, message: &str) {
        self.push_submit_result(Err(WalletError::Rejected(message.to_string())));
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Every transfer handed to `submit_value_transfer`, in order.
    pub fn submitted(&self) -> Vec<ValueTransfer> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletConnector for NullWalletConnector {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn connect(&self) -> Result<WalletAddress, WalletError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return Err(WalletError::NotInstalled);
        }
        let result = self.connect_result.lock().unwrap().clone();
        if let Ok(address) = &result {
            self.set_current(Some(address.clone()));
        }
        result
    }

    async fn current_address(&self) -> Result<Option<WalletAddress>, WalletError> {
        if let Some(e) = self.current_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.current.lock().unwrap().clone())
    }

    async fn submit_value_transfer(
        &self,
        transfer: &ValueTransfer,
    ) -> Result<TransactionId, WalletError> {
        let n = self.submit_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.available.load(Ordering::SeqCst) {
            return Err(WalletError::NotInstalled);
        }
        self.submitted.lock().unwrap().push(transfer.clone());
        match self.submit_results.lock().unwrap().pop_front() {
            Some(result) => result,
            None => TransactionId::new(format!("0x{n:064x}"))
                .ok_or_else(|| WalletError::Rejected("empty transaction id".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidchain_types::{AidParams, TokenAmount};
    use aidchain_wallet_core::build_donation_transfer;

    fn alice() -> WalletAddress {
        WalletAddress::parse(&format!("0x{}", "a1".repeat(20))).unwrap()
    }

    #[tokio::test]
    async fn connect_sets_current_signer() {
        let wallet = NullWalletConnector::new(alice());
        assert_eq!(wallet.current_address().await.unwrap(), None);
        assert_eq!(wallet.connect().await.unwrap(), alice());
        assert_eq!(wallet.current_address().await.unwrap(), Some(alice()));
        assert_eq!(wallet.connect_calls(), 1);
    }

    #[tokio::test]
    async fn scripted_then_generated_submissions() {
        let wallet = NullWalletConnector::connected(alice());
        wallet.reject_next("user declined");
        let transfer = build_donation_transfer(
            &AidParams::default(),
            "food",
            "",
            TokenAmount::from_units(1),
            Some(alice()),
        );

        let first = wallet.submit_value_transfer(&transfer).await;
        assert_eq!(first, Err(WalletError::Rejected("user declined".into())));
        let second = wallet.submit_value_transfer(&transfer).await.unwrap();
        assert!(second.as_str().starts_with("0x"));
        assert_eq!(wallet.submit_calls(), 2);
        assert_eq!(wallet.submitted().len(), 2);
    }
}
