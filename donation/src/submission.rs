//! The donation submission flow.
//!
//! `submit` runs, in order:
//! 1. amount validation (no side effects on failure)
//! 2. signer resolution, connecting the wallet if needed
//! 3. exactly one value-transfer submission, never retried
//! 4. reward derivation and a single append to the donation list
//!
//! Step 4 is best effort: the transfer already went through, so a failed
//! write is reported on the receipt instead of failing the call.

use std::sync::Arc;

use tracing::Instrument;

use aidchain_store::{keys, Persistence, RecordStore};
use aidchain_types::{AidError, AidParams, Clock, DonationRecord, TokenAmount, TransactionId};
use aidchain_wallet_core::{build_donation_transfer, resolve_signer, WalletConnector};

/// What a successful donation produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonationReceipt {
    pub transaction_id: TransactionId,
    pub record: DonationRecord,
    pub persistence: Persistence,
}

/// Parse a user-entered amount and check it against the configured minimum.
pub fn parse_amount(text: &str, params: &AidParams) -> Result<TokenAmount, AidError> {
    let amount = TokenAmount::parse(text)
        .map_err(|e| AidError::InvalidAmount(format!("{text:?}: {e}")))?;
    if amount.is_zero() {
        return Err(AidError::InvalidAmount("amount must be positive".into()));
    }
    if amount < params.min_donation {
        return Err(AidError::InvalidAmount(format!(
            "minimum donation is {}",
            params.min_donation
        )));
    }
    Ok(amount)
}

pub struct DonationSubmissionFlow {
    wallet: Arc<dyn WalletConnector>,
    store: Arc<RecordStore>,
    clock: Arc<dyn Clock>,
    params: AidParams,
}

impl DonationSubmissionFlow {
    pub fn new(
        wallet: Arc<dyn WalletConnector>,
        store: Arc<RecordStore>,
        clock: Arc<dyn Clock>,
        params: AidParams,
    ) -> Self {
        Self {
            wallet,
            store,
            clock,
            params,
        }
    }

    pub fn params(&self) -> &AidParams {
        &self.params
    }

    /// Donate `amount_text` to the contract under `category`.
    pub async fn submit(
        &self,
        category: &str,
        message: &str,
        amount_text: &str,
    ) -> Result<DonationReceipt, AidError> {
        let span = tracing::info_span!("donation_submit", category, amount = amount_text);
        self.submit_inner(category, message, amount_text)
            .instrument(span)
            .await
    }

    async fn submit_inner(
        &self,
        category: &str,
        message: &str,
        amount_text: &str,
    ) -> Result<DonationReceipt, AidError> {
        let principal = parse_amount(amount_text, &self.params)?;
        let signer = resolve_signer(self.wallet.as_ref()).await?;

        let transfer = build_donation_transfer(
            &self.params,
            category,
            message,
            principal,
            Some(signer.clone()),
        );
        let transaction_id = match self.wallet.submit_value_transfer(&transfer).await {
            Ok(id) => id,
            Err(e) => {
                tracing::info!(signer = %signer, error = %e, "donation not submitted");
                return Err(e.into());
            }
        };

        let record = DonationRecord {
            address: signer,
            amount_principal: principal,
            derived_reward: self.params.reward_for(principal),
            category: category.to_string(),
            message: message.to_string(),
            transaction_id: transaction_id.clone(),
            timestamp: self.clock.now(),
        };
        let persistence =
            Persistence::from_result(self.store.append(keys::DONATIONS, &record), keys::DONATIONS);

        tracing::info!(
            tx = %transaction_id,
            donor = %record.address,
            principal = %record.amount_principal,
            reward = %record.derived_reward,
            "donation submitted"
        );

        Ok(DonationReceipt {
            transaction_id,
            record,
            persistence,
        })
    }
}
