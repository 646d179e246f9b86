//! Community validation of distribution requests.

use std::sync::Arc;

use tracing::Instrument;

use aidchain_store::{keys, Persistence, RecordStore};
use aidchain_types::{AidError, Clock, DistributionRequest, ValidationRecord};
use aidchain_wallet_core::{resolve_signer, WalletConnector};

use crate::book::RequestBook;
use crate::engine::ValidationEngine;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReceipt {
    pub request: DistributionRequest,
    pub record: ValidationRecord,
    /// The request moved from active to ready with this validation.
    pub promoted: bool,
    pub persistence: Persistence,
}

pub struct ValidationFlow {
    wallet: Arc<dyn WalletConnector>,
    book: Arc<RequestBook>,
    store: Arc<RecordStore>,
    clock: Arc<dyn Clock>,
    engine: ValidationEngine,
}

impl ValidationFlow {
    pub fn new(
        wallet: Arc<dyn WalletConnector>,
        book: Arc<RequestBook>,
        store: Arc<RecordStore>,
        clock: Arc<dyn Clock>,
        quorum: u32,
    ) -> Self {
        Self {
            wallet,
            book,
            store,
            clock,
            engine: ValidationEngine::new(quorum),
        }
    }

    /// Attest to request `request_id` as the current signer.
    ///
    /// The validator set update and any status promotion land in one write of
    /// the request snapshot. The validation record is a separate best-effort
    /// append.
    pub async fn validate(&self, request_id: &str) -> Result<ValidationReceipt, AidError> {
        let span = tracing::info_span!("request_validate", request = %request_id);
        self.validate_inner(request_id).instrument(span).await
    }

    async fn validate_inner(&self, request_id: &str) -> Result<ValidationReceipt, AidError> {
        let _guard = self.book.lock_request(request_id).await;
        self.book.require(request_id)?;

        let validator = resolve_signer(self.wallet.as_ref()).await?;

        let (outcome, request, snapshot) = self.book.update(request_id, |request| {
            self.engine.record_validation(request, validator.clone())
        })?;

        let record = ValidationRecord {
            request_id: request_id.to_string(),
            address: validator,
            timestamp: self.clock.now(),
        };
        let appended = Persistence::from_result(
            self.store.append(keys::VALIDATIONS, &record),
            keys::VALIDATIONS,
        );

        if outcome.promoted {
            tracing::info!(
                validators = outcome.validator_count,
                quorum = self.engine.quorum(),
                "quorum reached, request ready for distribution"
            );
        } else {
            tracing::info!(
                validator = %record.address,
                validators = outcome.validator_count,
                "validation recorded"
            );
        }

        Ok(ValidationReceipt {
            request,
            record,
            promoted: outcome.promoted,
            persistence: snapshot.and(appended),
        })
    }
}
