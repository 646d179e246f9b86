//! Wallet address type (`0x` + 40 hex characters).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AidError;

/// A wallet (or contract) address as reported by the wallet connector.
///
/// Validated addresses are normalised to lowercase so that set membership
/// does not depend on the checksum casing the wallet happens to return.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(pub(crate) String);

impl WalletAddress {
    /// The standard prefix for all addresses.
    pub const PREFIX: &'static str = "0x";

    /// Sentinel used when the signer could not be resolved.
    pub const UNKNOWN: &'static str = "unknown";

    /// Number of hex characters after the prefix.
    const HEX_LEN: usize = 40;

    /// Parse and normalise an address.
    pub fn parse(raw: &str) -> Result<Self, AidError> {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix(Self::PREFIX)
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| AidError::InvalidAddress(raw.to_string()))?;
        if body.len() != Self::HEX_LEN || hex::decode(body).is_err() {
            return Err(AidError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(format!("{}{}", Self::PREFIX, body.to_ascii_lowercase())))
    }

    /// The `unknown` sentinel address.
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WalletAddress {
    type Err = AidError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
