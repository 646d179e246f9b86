use proptest::prelude::*;

use aidchain_types::amount::UNIT;
use aidchain_types::{TokenAmount, Timestamp};

proptest! {
    /// Whole units parse to exactly units * 10^18 base units.
    #[test]
    fn whole_units_parse_exactly(units in 0u64..1_000_000_000) {
        let parsed = TokenAmount::parse(&units.to_string()).unwrap();
        prop_assert_eq!(parsed, TokenAmount::from_units(units));
        prop_assert_eq!(parsed.raw(), units as u128 * UNIT);
    }

    /// Display output parses back to the same amount.
    #[test]
    fn display_parses_back(raw in 0u128..u128::MAX / 2) {
        let amount = TokenAmount::new(raw);
        prop_assert_eq!(TokenAmount::parse(&amount.to_string()).unwrap(), amount);
    }

    /// A fractional amount with up to 18 digits never loses precision.
    #[test]
    fn fractional_digits_are_exact(whole in 0u64..1_000_000, frac in 0u64..1_000_000_000_000_000_000) {
        let text = format!("{whole}.{frac:018}");
        let parsed = TokenAmount::parse(&text).unwrap();
        prop_assert_eq!(parsed.raw(), whole as u128 * UNIT + frac as u128);
    }

    /// Five percent of a principal with at most 16 fractional digits is exact.
    #[test]
    fn five_percent_reward_is_exact(raw_hundredths in 0u128..1_000_000_000_000_000_000_000) {
        // Any multiple of 100 base units divides evenly by 20.
        let principal = TokenAmount::new(raw_hundredths * 100);
        let reward = principal.mul_bps(500);
        prop_assert_eq!(reward.raw() * 20, principal.raw());
    }

    /// mul_bps never exceeds the principal for bps <= 10_000.
    #[test]
    fn mul_bps_bounded(raw in 0u128..u128::MAX, bps in 0u32..=10_000) {
        let amount = TokenAmount::new(raw);
        prop_assert!(amount.mul_bps(bps) <= amount);
    }

    /// Negative and signed-exponent inputs never parse.
    #[test]
    fn negative_amounts_rejected(units in 1u64..1_000_000) {
        let negative = format!("-{}", units);
        let exponent = format!("{}e2", units);
        prop_assert!(TokenAmount::parse(&negative).is_err());
        prop_assert!(TokenAmount::parse(&exponent).is_err());
    }

    /// Timestamp ordering: from_millis(a) <= from_millis(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::from_millis(a);
        let tb = Timestamp::from_millis(b);
        prop_assert_eq!(ta <= tb, a <= b);
    }

    /// elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::from_millis(base + offset);
        prop_assert_eq!(t.elapsed_since(Timestamp::from_millis(base)), 0);
        prop_assert_eq!(Timestamp::from_millis(base).elapsed_since(t), offset);
    }
}
