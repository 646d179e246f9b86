//! Donations earmarked for a single distribution request.

use std::sync::Arc;

use tracing::Instrument;

use aidchain_donation::{DonationReceipt, DonationSubmissionFlow};
use aidchain_store::Persistence;
use aidchain_types::{AidError, DistributionRequest, RequestStatus};

use crate::book::RequestBook;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributionReceipt {
    pub donation: DonationReceipt,
    pub request: DistributionRequest,
    /// Outcome of the request snapshot write. The donation record's outcome
    /// is on `donation`.
    pub persistence: Persistence,
}

pub fn contribution_message(request: &DistributionRequest) -> String {
    format!("Contribution to request {} - {}", request.id, request.title)
}

pub struct ContributionFlow {
    donations: Arc<DonationSubmissionFlow>,
    book: Arc<RequestBook>,
}

impl ContributionFlow {
    pub fn new(donations: Arc<DonationSubmissionFlow>, book: Arc<RequestBook>) -> Self {
        Self { donations, book }
    }

    /// Donate `amount_text` towards request `request_id`.
    ///
    /// The donation goes through the regular donation flow. Only once it is
    /// accepted is the request's raised amount increased.
    pub async fn contribute(
        &self,
        request_id: &str,
        amount_text: &str,
    ) -> Result<ContributionReceipt, AidError> {
        let span = tracing::info_span!("request_contribute", request = %request_id);
        self.contribute_inner(request_id, amount_text)
            .instrument(span)
            .await
    }

    async fn contribute_inner(
        &self,
        request_id: &str,
        amount_text: &str,
    ) -> Result<ContributionReceipt, AidError> {
        let _guard = self.book.lock_request(request_id).await;
        let request = self.book.require(request_id)?;
        if request.status == RequestStatus::Distributed {
            return Err(AidError::RequestClosed(request_id.to_string()));
        }

        let donation = self
            .donations
            .submit(&request.category, &contribution_message(&request), amount_text)
            .await?;

        let principal = donation.record.amount_principal;
        let ((), request, persistence) = self.book.update(request_id, |request| {
            request.add_contribution(principal);
            Ok(())
        })?;
        tracing::info!(
            raised = %request.raised_amount,
            requested = %request.requested_amount,
            "contribution applied"
        );

        Ok(ContributionReceipt {
            donation,
            request,
            persistence,
        })
    }
}
