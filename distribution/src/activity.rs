//! Validator activity over the recorded validations.

use std::collections::HashMap;

use serde::Serialize;

use aidchain_types::{ValidationRecord, WalletAddress};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidatorActivity {
    pub address: WalletAddress,
    pub validations: usize,
}

/// Validations per address, most active first, ties by first appearance.
pub fn validator_activity(records: &[ValidationRecord], limit: usize) -> Vec<ValidatorActivity> {
    let mut activity: Vec<ValidatorActivity> = Vec::new();
    let mut index: HashMap<&WalletAddress, usize> = HashMap::new();
    for record in records {
        let slot = *index.entry(&record.address).or_insert_with(|| {
            activity.push(ValidatorActivity {
                address: record.address.clone(),
                validations: 0,
            });
            activity.len() - 1
        });
        activity[slot].validations += 1;
    }
    activity.sort_by(|a, b| b.validations.cmp(&a.validations));
    activity.truncate(limit);
    activity
}
