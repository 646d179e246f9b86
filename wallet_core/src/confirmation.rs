//! The confirmation capability that guards irreversible local actions.

use async_trait::async_trait;

use aidchain_types::DistributionRequest;

/// Asks the user to confirm marking a request as distributed.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    /// `true` to proceed. May suspend on user interaction.
    async fn confirm_distribution(&self, request: &DistributionRequest) -> bool;
}

/// A gate that always agrees, for non-interactive use (`--yes`).
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoConfirm;

#[async_trait]
impl ConfirmationGate for AutoConfirm {
    async fn confirm_distribution(&self, _request: &DistributionRequest) -> bool {
        true
    }
}
