//! Distribution requests and their lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::WalletAddress;
use crate::amount::TokenAmount;

/// How urgently a request needs funding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a distribution request.
///
/// `Active → Ready` once the validator set reaches quorum, `Ready → Distributed`
/// on manual confirmation. `Distributed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Collecting validations.
    Active,
    /// Quorum reached; awaiting distribution.
    Ready,
    /// Aid handed out. No further transitions.
    Distributed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ready => "ready",
            Self::Distributed => "distributed",
        }
    }

    /// Whether the UI still solicits validations.
    pub fn accepts_validations(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Distributed)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A community aid request, the aggregate that validation, contribution and
/// distribution mutate.
///
/// Validators and status live on the same record so that adding a validator
/// and promoting the status are one update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRequest {
    pub id: String,
    pub title: String,
    pub location: String,
    pub urgency: Urgency,
    pub category: String,
    pub requested_amount: TokenAmount,
    pub raised_amount: TokenAmount,
    pub recipient_count: u32,
    pub initial_validator: WalletAddress,
    pub status: RequestStatus,
    /// Distinct validating addresses in the order they validated.
    #[serde(default)]
    pub validators: Vec<WalletAddress>,
    #[serde(default)]
    pub description: String,
}

impl DistributionRequest {
    pub fn has_validator(&self, address: &WalletAddress) -> bool {
        self.validators.contains(address)
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Union `address` into the validator set. Returns `false` if it was
    /// already present.
    pub fn add_validator(&mut self, address: WalletAddress) -> bool {
        if self.has_validator(&address) {
            return false;
        }
        self.validators.push(address);
        true
    }

    /// Add a contribution to the raised amount. Never decreases.
    pub fn add_contribution(&mut self, amount: TokenAmount) {
        self.raised_amount = self.raised_amount.saturating_add(amount);
    }

    /// Funding progress in basis points (capped at 100%).
    pub fn progress_bps(&self) -> u32 {
        self.raised_amount.ratio_bps(self.requested_amount)
    }
}
