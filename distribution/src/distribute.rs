//! Marking a ready request as distributed.
//!
//! Distribution is recorded locally only. No chain submission happens here.

use std::sync::Arc;

use tracing::Instrument;

use aidchain_store::{keys, Persistence, RecordStore};
use aidchain_types::{AidError, Clock, DistributionRecord, DistributionRequest, RequestStatus};
use aidchain_wallet_core::{best_effort_signer, ConfirmationGate, WalletConnector};

use crate::book::RequestBook;
use crate::engine::ValidationEngine;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionReceipt {
    pub request: DistributionRequest,
    pub record: DistributionRecord,
    pub persistence: Persistence,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DistributionOutcome {
    Distributed(DistributionReceipt),
    /// The user declined at the confirmation gate. Nothing changed.
    Declined,
}

pub struct DistributionFlow {
    wallet: Arc<dyn WalletConnector>,
    book: Arc<RequestBook>,
    store: Arc<RecordStore>,
    clock: Arc<dyn Clock>,
    gate: Arc<dyn ConfirmationGate>,
    engine: ValidationEngine,
}

impl DistributionFlow {
    pub fn new(
        wallet: Arc<dyn WalletConnector>,
        book: Arc<RequestBook>,
        store: Arc<RecordStore>,
        clock: Arc<dyn Clock>,
        gate: Arc<dyn ConfirmationGate>,
    ) -> Self {
        Self {
            wallet,
            book,
            store,
            clock,
            gate,
            // Quorum plays no part in distribution.
            engine: ValidationEngine::new(0),
        }
    }

    pub async fn distribute(&self, request_id: &str) -> Result<DistributionOutcome, AidError> {
        let span = tracing::info_span!("request_distribute", request = %request_id);
        self.distribute_inner(request_id).instrument(span).await
    }

    async fn distribute_inner(&self, request_id: &str) -> Result<DistributionOutcome, AidError> {
        let _guard = self.book.lock_request(request_id).await;
        let current = self.book.require(request_id)?;
        if current.status != RequestStatus::Ready {
            return Err(AidError::NotReady {
                request_id: request_id.to_string(),
                status: current.status,
            });
        }

        if !self.gate.confirm_distribution(&current).await {
            tracing::info!("distribution declined");
            return Ok(DistributionOutcome::Declined);
        }

        let distributor = best_effort_signer(self.wallet.as_ref()).await;

        let ((), request, snapshot) = self
            .book
            .update(request_id, |request| self.engine.mark_distributed(request))?;

        let record = DistributionRecord {
            request_id: request_id.to_string(),
            distributor,
            timestamp: self.clock.now(),
        };
        let appended = Persistence::from_result(
            self.store.append(keys::DISTRIBUTIONS, &record),
            keys::DISTRIBUTIONS,
        );
        tracing::info!(distributor = %record.distributor, "request marked distributed");

        Ok(DistributionOutcome::Distributed(DistributionReceipt {
            request,
            record,
            persistence: snapshot.and(appended),
        }))
    }
}
