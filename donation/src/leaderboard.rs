//! Donor leaderboard, recomputed from the donation records on demand.

use std::collections::HashMap;

use serde::Serialize;

use aidchain_types::{DonationRecord, TokenAmount, WalletAddress};

/// One donor's totals. Derived, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub address: WalletAddress,
    pub total_donated: TokenAmount,
    pub total_rewards: TokenAmount,
}

/// Rank donors by total rewards, highest first, keeping at most `limit`.
///
/// Donors with equal rewards keep the order in which they first appear in
/// `records`, so the output is a pure function of its input.
pub fn aggregate(records: &[DonationRecord], limit: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::new();
    let mut index: HashMap<&WalletAddress, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(&record.address).or_insert_with(|| {
            entries.push(LeaderboardEntry {
                address: record.address.clone(),
                total_donated: TokenAmount::ZERO,
                total_rewards: TokenAmount::ZERO,
            });
            entries.len() - 1
        });
        let entry = &mut entries[slot];
        entry.total_donated = entry.total_donated.saturating_add(record.amount_principal);
        entry.total_rewards = entry.total_rewards.saturating_add(record.derived_reward);
    }

    // sort_by is stable: ties stay in first-appearance order.
    entries.sort_by(|a, b| b.total_rewards.cmp(&a.total_rewards));
    entries.truncate(limit);
    entries
}
