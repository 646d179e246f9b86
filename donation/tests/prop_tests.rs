use proptest::prelude::*;

use aidchain_donation::{aggregate, parse_amount};
use aidchain_types::{AidError, AidParams, DonationRecord, Timestamp, TokenAmount, TransactionId, WalletAddress};

fn address(n: u8) -> WalletAddress {
    WalletAddress::parse(&format!("0x{}", format!("{n:02x}").repeat(20))).unwrap()
}

fn record(who: u8, raw: u128, seq: usize) -> DonationRecord {
    let principal = TokenAmount::new(raw);
    DonationRecord {
        address: address(who),
        amount_principal: principal,
        derived_reward: principal.mul_bps(500),
        category: "medical".into(),
        message: String::new(),
        transaction_id: TransactionId::new(format!("0x{seq:x}")).unwrap(),
        timestamp: Timestamp::from_millis(seq as u64),
    }
}

fn records() -> impl Strategy<Value = Vec<DonationRecord>> {
    prop::collection::vec((0u8..6, 0u128..1_000_000_000_000_000_000_000), 0..40).prop_map(|v| {
        v.into_iter()
            .enumerate()
            .map(|(seq, (who, raw))| record(who, raw, seq))
            .collect()
    })
}

proptest! {
    /// Same input, same output.
    #[test]
    fn leaderboard_is_deterministic(records in records(), limit in 0usize..10) {
        prop_assert_eq!(aggregate(&records, limit), aggregate(&records, limit));
    }

    /// Entries are ordered by rewards, never exceed the limit, and sum to the input.
    #[test]
    fn leaderboard_is_sorted_and_complete(records in records()) {
        let board = aggregate(&records, usize::MAX);
        prop_assert!(board.windows(2).all(|w| w[0].total_rewards >= w[1].total_rewards));

        let donated: TokenAmount = board.iter().map(|e| e.total_donated).sum();
        let expected: TokenAmount = records.iter().map(|r| r.amount_principal).sum();
        prop_assert_eq!(donated, expected);

        let limited = aggregate(&records, 3);
        prop_assert!(limited.len() <= 3);
        prop_assert_eq!(&limited[..], &board[..limited.len()]);
    }

    /// Anything below the minimum is refused.
    #[test]
    fn below_minimum_is_invalid(hundredths in 0u64..100) {
        let text = format!("0.{hundredths:02}");
        prop_assert!(matches!(
            parse_amount(&text, &AidParams::default()),
            Err(AidError::InvalidAmount(_))
        ));
    }

    /// Anything at or above the minimum is accepted unchanged.
    #[test]
    fn at_or_above_minimum_is_accepted(units in 1u64..1_000_000, hundredths in 0u64..100) {
        let text = format!("{units}.{hundredths:02}");
        let parsed = parse_amount(&text, &AidParams::default()).unwrap();
        prop_assert_eq!(parsed, TokenAmount::parse(&text).unwrap());
    }
}
