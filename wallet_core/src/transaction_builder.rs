//! Value-transfer construction for the donation contract.

use serde::{Deserialize, Serialize};

use aidchain_types::{AidParams, TokenAmount, WalletAddress};

/// Name of the payable contract method that receives donations.
pub const DONATE_METHOD: &str = "donate";

/// Call data carried with a donation: `donate(category, message)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationPayload {
    pub method: String,
    pub category: String,
    pub message: String,
}

/// A payable contract call handed to the wallet for signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueTransfer {
    /// Receiving contract.
    pub to: WalletAddress,
    pub payload: DonationPayload,
    /// Amount attached to the call.
    pub value: TokenAmount,
    /// Signer the wallet should use, when already known.
    pub signer: Option<WalletAddress>,
    /// Comment the wallet shows in its signing prompt.
    pub comment: String,
}

impl ValueTransfer {
    /// The attached value in base units (18-decimal fixed point), exact.
    pub fn value_base_units(&self) -> u128 {
        self.value.raw()
    }
}

/// Build the donation call for `amount` to the configured contract.
pub fn build_donation_transfer(
    params: &AidParams,
    category: &str,
    message: &str,
    amount: TokenAmount,
    signer: Option<WalletAddress>,
) -> ValueTransfer {
    ValueTransfer {
        to: params.donation_contract.clone(),
        payload: DonationPayload {
            method: DONATE_METHOD.to_string(),
            category: category.to_string(),
            message: message.to_string(),
        },
        value: amount,
        signer,
        comment: params.signing_comment.clone(),
    }
}
