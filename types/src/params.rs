//! Donation and validation parameters.

use serde::{Deserialize, Serialize};

use crate::address::WalletAddress;
use crate::amount::TokenAmount;
use crate::error::AidError;

/// Tunable values for the flows.
///
/// Deserialises from a partial table: every missing field takes its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AidParams {
    /// Smallest accepted donation, in display units.
    pub min_donation: TokenAmount,

    /// Reward paid per donation, in basis points of the principal (500 = 5%).
    pub reward_bps: u32,

    /// Distinct validators needed to move a request from active to ready.
    pub quorum_threshold: u32,

    /// Contract that receives donations.
    pub donation_contract: WalletAddress,

    /// Reward token contract (informational only).
    pub reward_token: WalletAddress,

    /// Block explorer base URL.
    pub explorer_base: String,

    /// Comment shown by the wallet when it asks the user to sign.
    pub signing_comment: String,
}

impl AidParams {
    /// Testnet defaults.
    pub fn testnet_defaults() -> Self {
        Self {
            min_donation: TokenAmount::from_units(1),
            reward_bps: 500, // 5%
            quorum_threshold: 3,
            donation_contract: WalletAddress(
                "0x4e17357053da4b473e2daa2c65c2c949545724b8".to_string(),
            ),
            reward_token: WalletAddress("0xdccaabd81b38e0deef4c202bc7f1261a4d9192c6".to_string()),
            explorer_base: "https://explore-testnet.vechain.org".to_string(),
            signing_comment: "Donate to AIDchain".to_string(),
        }
    }

    /// Reward earned for donating `principal`.
    pub fn reward_for(&self, principal: TokenAmount) -> TokenAmount {
        principal.mul_bps(self.reward_bps)
    }

    /// Reject parameter sets the flows cannot work with.
    pub fn validate(&self) -> Result<(), AidError> {
        if self.reward_bps > 10_000 {
            return Err(AidError::InvalidParams(format!(
                "reward_bps {} exceeds 10000",
                self.reward_bps
            )));
        }
        if self.quorum_threshold == 0 {
            return Err(AidError::InvalidParams("quorum_threshold must be at least 1".into()));
        }
        if self.min_donation.is_zero() {
            return Err(AidError::InvalidParams("min_donation must be positive".into()));
        }
        WalletAddress::parse(self.donation_contract.as_str())?;
        Ok(())
    }
}

/// Default is the testnet configuration.
impl Default for AidParams {
    fn default() -> Self {
        Self::testnet_defaults()
    }
}
