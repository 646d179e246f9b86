//! Validation engine: the pure state changes applied to a request.

use aidchain_types::{AidError, DistributionRequest, RequestStatus, WalletAddress};

/// What a recorded validation changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub validator_count: usize,
    /// The request moved from active to ready with this validation.
    pub promoted: bool,
}

pub struct ValidationEngine {
    quorum: u32,
}

impl ValidationEngine {
    pub fn new(quorum: u32) -> Self {
        Self { quorum }
    }

    pub fn quorum(&self) -> u32 {
        self.quorum
    }

    /// Record `validator` against `request`.
    ///
    /// Fails with `AlreadyValidated` and leaves the request untouched when the
    /// address is already in the validator set. Promotion only ever happens
    /// from `active`; a non-active request keeps its status.
    pub fn record_validation(
        &self,
        request: &mut DistributionRequest,
        validator: WalletAddress,
    ) -> Result<ValidationOutcome, AidError> {
        if request.has_validator(&validator) {
            return Err(AidError::AlreadyValidated {
                request_id: request.id.clone(),
                address: validator.to_string(),
            });
        }
        request.add_validator(validator);

        let promoted = request.status == RequestStatus::Active && self.check_quorum(request);
        if promoted {
            request.status = RequestStatus::Ready;
        }
        Ok(ValidationOutcome {
            validator_count: request.validator_count(),
            promoted,
        })
    }

    /// Whether the validator set has reached quorum.
    pub fn check_quorum(&self, request: &DistributionRequest) -> bool {
        request.validator_count() as u64 >= self.quorum as u64
    }

    /// `ready → distributed`. Anything else is `NotReady`.
    pub fn mark_distributed(&self, request: &mut DistributionRequest) -> Result<(), AidError> {
        if request.status != RequestStatus::Ready {
            return Err(AidError::NotReady {
                request_id: request.id.clone(),
                status: request.status,
            });
        }
        request.status = RequestStatus::Distributed;
        Ok(())
    }
}
