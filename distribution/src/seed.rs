//! Requests the book starts with when nothing has been stored yet.

use aidchain_types::{DistributionRequest, RequestStatus, TokenAmount, Urgency, WalletAddress};

fn seed_address(raw: &str) -> WalletAddress {
    WalletAddress::parse(raw).unwrap_or_else(|_| WalletAddress::unknown())
}

pub fn initial_requests() -> Vec<DistributionRequest> {
    vec![
        DistributionRequest {
            id: "1".into(),
            title: "Emergency Medical Aid - Jakarta".into(),
            location: "Jakarta, Indonesia".into(),
            urgency: Urgency::High,
            category: "Medical".into(),
            requested_amount: TokenAmount::from_units(2_500),
            raised_amount: TokenAmount::from_units(1_800),
            recipient_count: 45,
            initial_validator: seed_address("0x742d35cc6635c0532925a3b8d55dedc4cf384df9"),
            status: RequestStatus::Active,
            validators: Vec::new(),
            description: "Urgent medical supplies needed for flood victims in the Jakarta region."
                .into(),
        },
        DistributionRequest {
            id: "2".into(),
            title: "School Supplies Distribution".into(),
            location: "Surabaya, Indonesia".into(),
            urgency: Urgency::Medium,
            category: "Education".into(),
            requested_amount: TokenAmount::from_units(1_200),
            raised_amount: TokenAmount::from_units(1_200),
            recipient_count: 120,
            initial_validator: seed_address("0x8ba1f109551bd432803012645fac136c30b70c08"),
            status: RequestStatus::Ready,
            validators: Vec::new(),
            description: "Educational materials and school supplies for underprivileged children."
                .into(),
        },
        DistributionRequest {
            id: "3".into(),
            title: "Food Package Distribution".into(),
            location: "Bandung, Indonesia".into(),
            urgency: Urgency::High,
            category: "Food".into(),
            requested_amount: TokenAmount::from_units(3_000),
            raised_amount: TokenAmount::from_units(2_100),
            recipient_count: 200,
            initial_validator: seed_address("0x9f8e7d6c5b4a3e2f1d0c9b8a7f6e5d4c3b2a1f0e"),
            status: RequestStatus::Active,
            validators: Vec::new(),
            description: "Monthly food packages for families affected by economic hardship.".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_unique_ids_and_valid_validators() {
        let requests = initial_requests();
        assert_eq!(requests.len(), 3);
        let mut ids: Vec<_> = requests.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(requests
            .iter()
            .all(|r| WalletAddress::parse(r.initial_validator.as_str()).is_ok()));
    }
}
