//! Records mirrored into local storage after each flow.

use serde::{Deserialize, Serialize};

use crate::address::WalletAddress;
use crate::amount::TokenAmount;
use crate::time::Timestamp;
use crate::tx::TransactionId;

/// A donation the external signer accepted.
///
/// Created only after a successful submission and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    pub address: WalletAddress,
    pub amount_principal: TokenAmount,
    pub derived_reward: TokenAmount,
    pub category: String,
    pub message: String,
    pub transaction_id: TransactionId,
    pub timestamp: Timestamp,
}

/// One validator's attestation against a distribution request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub request_id: String,
    pub address: WalletAddress,
    pub timestamp: Timestamp,
}

/// A request marked as distributed, with whoever confirmed it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub request_id: String,
    pub distributor: WalletAddress,
    pub timestamp: Timestamp,
}
