//! Token amount type shared by VET principals and B3TR rewards.
//!
//! Amounts are represented as fixed-point integers (u128) of base units to avoid
//! floating-point errors. Both tokens use 18 decimals, so 1 display unit is
//! 10^18 base units.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

/// Number of fractional digits in one display unit.
pub const DECIMALS: usize = 18;

/// Base units per display unit (10^18).
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Denominator for basis-point arithmetic.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Why a decimal amount string could not be turned into a [`TokenAmount`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("amount is empty")]
    Empty,

    #[error("amount is not a decimal number: {0:?}")]
    Malformed(String),

    #[error("amount has more than {DECIMALS} fractional digits")]
    TooPrecise,

    #[error("amount is too large")]
    Overflow,
}

/// A token amount in base units (10^-18 of a display unit).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    /// Wrap a raw base-unit count.
    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole display units.
    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * UNIT)
    }

    /// Parse a decimal display amount such as `"10"`, `"0.5"` or `" 2.25 "`.
    ///
    /// Accepts an optional leading `+`, digits, and at most one `.`. Signs,
    /// exponents, `NaN` and `inf` are rejected, as is anything finer than one
    /// base unit.
    pub fn parse(text: &str) -> Result<Self, AmountParseError> {
        let trimmed = text.trim();
        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(AmountParseError::Malformed(text.to_string()));
        }
        if frac_part.len() > DECIMALS {
            return Err(AmountParseError::TooPrecise);
        }

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| AmountParseError::Overflow)?
        };
        let fraction: u128 = if frac_part.is_empty() {
            0
        } else {
            let digits: u128 = frac_part.parse().map_err(|_| AmountParseError::Overflow)?;
            digits * 10u128.pow((DECIMALS - frac_part.len()) as u32)
        };

        whole
            .checked_mul(UNIT)
            .and_then(|w| w.checked_add(fraction))
            .map(Self)
            .ok_or(AmountParseError::Overflow)
    }

    /// The raw base-unit count (the value handed to the wallet).
    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// `self * bps / 10_000`, rounded down, without intermediate overflow.
    pub fn mul_bps(self, bps: u32) -> Self {
        let bps = bps as u128;
        let quotient = self.0 / BPS_DENOMINATOR;
        let remainder = self.0 % BPS_DENOMINATOR;
        Self(
            quotient
                .saturating_mul(bps)
                .saturating_add(remainder * bps / BPS_DENOMINATOR),
        )
    }

    /// Ratio `self / whole` in basis points, capped at 10_000.
    pub fn ratio_bps(self, whole: Self) -> u32 {
        if whole.is_zero() {
            return 0;
        }
        if self >= whole {
            return BPS_DENOMINATOR as u32;
        }
        // self < whole, so the scaled value stays below 10_000.
        match self.0.checked_mul(BPS_DENOMINATOR) {
            Some(scaled) => (scaled / whole.0) as u32,
            None => (self.0 / (whole.0 / BPS_DENOMINATOR).max(1)).min(BPS_DENOMINATOR) as u32,
        }
    }
}

/// Saturates at the largest representable amount.
impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl std::iter::Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNIT;
        let fraction = self.0 % UNIT;
        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{fraction:018}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl std::str::FromStr for TokenAmount {
    type Err = AmountParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Persisted as a decimal display string so records stay human-readable and
// lossless in JSON.
impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount string or a whole number of units")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TokenAmount, E> {
                TokenAmount::parse(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TokenAmount, E> {
                Ok(TokenAmount::from_units(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TokenAmount, E> {
                u64::try_from(v)
                    .map(TokenAmount::from_units)
                    .map_err(|_| E::custom("amount must not be negative"))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
