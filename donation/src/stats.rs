//! Summary statistics over recorded donations.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use aidchain_types::{DonationRecord, TokenAmount};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DonationStats {
    pub donation_count: usize,
    pub total_donated: TokenAmount,
    pub total_rewards: TokenAmount,
    pub unique_donors: usize,
}

/// Principal donated to one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: TokenAmount,
    pub count: usize,
}

pub fn donation_stats(records: &[DonationRecord]) -> DonationStats {
    let donors: HashSet<_> = records.iter().map(|r| &r.address).collect();
    DonationStats {
        donation_count: records.len(),
        total_donated: records.iter().map(|r| r.amount_principal).sum(),
        total_rewards: records.iter().map(|r| r.derived_reward).sum(),
        unique_donors: donors.len(),
    }
}

/// Per-category totals, in order of each category's first donation.
pub fn category_totals(records: &[DonationRecord]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let slot = *index.entry(record.category.as_str()).or_insert_with(|| {
            totals.push(CategoryTotal {
                category: record.category.clone(),
                total: TokenAmount::ZERO,
                count: 0,
            });
            totals.len() - 1
        });
        totals[slot].total = totals[slot].total.saturating_add(record.amount_principal);
        totals[slot].count += 1;
    }
    totals
}

/// The `n` newest donations, newest first.
///
/// Records sharing a timestamp are returned latest-appended first.
pub fn recent(records: &[DonationRecord], n: usize) -> Vec<DonationRecord> {
    let mut newest: Vec<DonationRecord> = records.iter().rev().cloned().collect();
    newest.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    newest.truncate(n);
    newest
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidchain_types::{Timestamp, TransactionId, WalletAddress};

    fn donation(who: &str, category: &str, units: u64, at: u64) -> DonationRecord {
        DonationRecord {
            address: WalletAddress::parse(&format!("0x{}", who.repeat(40 / who.len()))).unwrap(),
            amount_principal: TokenAmount::from_units(units),
            derived_reward: TokenAmount::from_units(units).mul_bps(500),
            category: category.into(),
            message: String::new(),
            transaction_id: TransactionId::new(format!("0x{at:x}")).unwrap(),
            timestamp: Timestamp::from_millis(at),
        }
    }

    #[test]
    fn stats_over_empty_store() {
        assert_eq!(donation_stats(&[]), DonationStats::default());
    }

    #[test]
    fn stats_count_unique_donors() {
        let records = vec![
            donation("a", "medical", 10, 1),
            donation("b", "food", 5, 2),
            donation("a", "food", 5, 3),
        ];
        let stats = donation_stats(&records);
        assert_eq!(stats.donation_count, 3);
        assert_eq!(stats.unique_donors, 2);
        assert_eq!(stats.total_donated, TokenAmount::from_units(20));
        assert_eq!(stats.total_rewards, TokenAmount::from_units(1));
    }

    #[test]
    fn categories_in_first_appearance_order() {
        let records = vec![
            donation("a", "medical", 10, 1),
            donation("b", "food", 5, 2),
            donation("a", "medical", 1, 3),
        ];
        let totals = category_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, "medical");
        assert_eq!(totals[0].total, TokenAmount::from_units(11));
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[1].category, "food");
    }

    #[test]
    fn recent_is_newest_first() {
        let records = vec![
            donation("a", "x", 1, 10),
            donation("b", "x", 2, 30),
            donation("c", "x", 3, 20),
            donation("d", "x", 4, 30),
        ];
        let latest = recent(&records, 3);
        let units: Vec<_> = latest.iter().map(|r| r.amount_principal).collect();
        assert_eq!(
            units,
            vec![
                TokenAmount::from_units(4),
                TokenAmount::from_units(2),
                TokenAmount::from_units(3)
            ]
        );
    }
}
