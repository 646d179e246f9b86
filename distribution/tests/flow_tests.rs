//! Request lifecycle tests: validation → quorum → distribution, plus
//! contributions, all against the nullable wallet, clock and store.

use std::sync::Arc;

use aidchain_distribution::{
    validator_activity, ContributionFlow, DistributionFlow, DistributionOutcome, RequestBook,
    RequestFilter, ValidationFlow,
};
use aidchain_donation::DonationSubmissionFlow;
use aidchain_nullables::{NullClock, NullConfirmation, NullKvStore, NullWalletConnector};
use aidchain_store::{keys, RecordStore};
use aidchain_types::{
    AidError, AidParams, DistributionRecord, DistributionRequest, DonationRecord, RequestStatus,
    TokenAmount, ValidationRecord, WalletAddress,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Harness {
    wallet: Arc<NullWalletConnector>,
    kv: Arc<NullKvStore>,
    store: Arc<RecordStore>,
    clock: Arc<NullClock>,
    gate: Arc<NullConfirmation>,
    book: Arc<RequestBook>,
    validation: ValidationFlow,
    distribution: DistributionFlow,
    contribution: ContributionFlow,
}

fn addr(n: u8) -> WalletAddress {
    WalletAddress::parse(&format!("0x{}", format!("{n:02x}").repeat(20))).unwrap()
}

fn active_request(id: &str) -> DistributionRequest {
    let mut request = aidchain_distribution::initial_requests().remove(0);
    request.id = id.to_string();
    request
}

fn harness_with(requests: Option<Vec<DistributionRequest>>) -> Harness {
    let wallet = Arc::new(NullWalletConnector::connected(addr(1)));
    let kv = Arc::new(NullKvStore::new());
    let store = Arc::new(RecordStore::new(kv.clone()));
    let clock = Arc::new(NullClock::new(5_000));
    let gate = Arc::new(NullConfirmation::accepting());
    let book = Arc::new(match requests {
        Some(requests) => RequestBook::with_requests(store.clone(), requests),
        None => RequestBook::load(store.clone()),
    });
    let params = AidParams::default();

    let donations = Arc::new(DonationSubmissionFlow::new(
        wallet.clone(),
        store.clone(),
        clock.clone(),
        params.clone(),
    ));
    Harness {
        validation: ValidationFlow::new(
            wallet.clone(),
            book.clone(),
            store.clone(),
            clock.clone(),
            params.quorum_threshold,
        ),
        distribution: DistributionFlow::new(
            wallet.clone(),
            book.clone(),
            store.clone(),
            clock.clone(),
            gate.clone(),
        ),
        contribution: ContributionFlow::new(donations, book.clone()),
        wallet,
        kv,
        store,
        clock,
        gate,
        book,
    }
}

fn harness() -> Harness {
    harness_with(None)
}

impl Harness {
    async fn validate_as(&self, who: u8, id: &str) -> Result<RequestStatus, AidError> {
        self.wallet.set_current(Some(addr(who)));
        self.validation.validate(id).await.map(|r| r.request.status)
    }

    fn stored_request(&self, id: &str) -> Option<DistributionRequest> {
        let stored: Vec<DistributionRequest> = self.store.read_all(keys::REQUESTS);
        stored.into_iter().find(|r| r.id == id)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn three_distinct_validators_make_request_ready() {
    let h = harness_with(Some(vec![active_request("r1")]));

    assert_eq!(h.validate_as(1, "r1").await, Ok(RequestStatus::Active));
    assert_eq!(h.validate_as(2, "r1").await, Ok(RequestStatus::Active));
    assert_eq!(h.validate_as(3, "r1").await, Ok(RequestStatus::Ready));

    let request = h.book.get("r1").unwrap();
    assert_eq!(request.validators, vec![addr(1), addr(2), addr(3)]);
    assert_eq!(h.stored_request("r1"), Some(request));

    let records: Vec<ValidationRecord> = h.store.read_all(keys::VALIDATIONS);
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.request_id == "r1"));
}

#[tokio::test]
async fn validating_twice_is_rejected_without_change() {
    let h = harness_with(Some(vec![active_request("r1")]));
    h.validate_as(1, "r1").await.unwrap();

    let err = h.validate_as(1, "r1").await.unwrap_err();
    assert!(matches!(err, AidError::AlreadyValidated { ref request_id, .. } if request_id == "r1"));

    assert_eq!(h.book.get("r1").unwrap().validator_count(), 1);
    let records: Vec<ValidationRecord> = h.store.read_all(keys::VALIDATIONS);
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn two_validators_stay_active() {
    let h = harness_with(Some(vec![active_request("r1")]));
    h.validate_as(1, "r1").await.unwrap();
    h.validate_as(2, "r1").await.unwrap();
    assert_eq!(h.book.get("r1").unwrap().status, RequestStatus::Active);
}

#[tokio::test]
async fn concurrent_validations_are_not_lost() {
    let h = harness_with(Some(vec![active_request("r1")]));
    // One wallet per task, so every call resolves a distinct signer.
    let mut handles = Vec::new();
    for who in 1..=5u8 {
        let wallet = Arc::new(NullWalletConnector::connected(addr(who)));
        let flow = ValidationFlow::new(
            wallet,
            h.book.clone(),
            h.store.clone(),
            h.clock.clone(),
            3,
        );
        handles.push(tokio::spawn(async move { flow.validate("r1").await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let request = h.book.get("r1").unwrap();
    assert_eq!(request.validator_count(), 5);
    assert_eq!(request.status, RequestStatus::Ready);
    let records: Vec<ValidationRecord> = h.store.read_all(keys::VALIDATIONS);
    assert_eq!(records.len(), 5);
}

#[tokio::test]
async fn validation_needs_a_wallet() {
    let h = harness_with(Some(vec![active_request("r1")]));
    h.wallet.set_available(false);
    assert_eq!(h.validate_as(1, "r1").await, Err(AidError::WalletNotInstalled));
    assert_eq!(h.book.get("r1").unwrap().validator_count(), 0);
}

#[tokio::test]
async fn unknown_request_is_reported_before_wallet() {
    let h = harness();
    h.wallet.set_available(false);
    assert_eq!(
        h.validation.validate("nope").await.unwrap_err(),
        AidError::UnknownRequest("nope".into())
    );
}

#[tokio::test]
async fn storage_failure_degrades_validation() {
    let h = harness_with(Some(vec![active_request("r1")]));
    h.kv.fail_writes(true);
    h.wallet.set_current(Some(addr(7)));
    let receipt = h.validation.validate("r1").await.unwrap();
    assert!(!receipt.persistence.is_stored());
    assert_eq!(h.book.get("r1").unwrap().validator_count(), 1);
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ready_request_is_distributed_once() {
    let h = harness();
    let outcome = h.distribution.distribute("2").await.unwrap();
    let DistributionOutcome::Distributed(receipt) = outcome else {
        panic!("expected distribution");
    };
    assert_eq!(receipt.request.status, RequestStatus::Distributed);
    assert_eq!(receipt.record.distributor, addr(1));
    assert_eq!(receipt.record.timestamp.as_millis(), 5_000);
    assert_eq!(h.gate.prompts(), 1);

    let err = h.distribution.distribute("2").await.unwrap_err();
    assert!(matches!(
        err,
        AidError::NotReady { status: RequestStatus::Distributed, .. }
    ));

    let records: Vec<DistributionRecord> = h.store.read_all(keys::DISTRIBUTIONS);
    assert_eq!(records.len(), 1);
    assert_eq!(h.stored_request("2").unwrap().status, RequestStatus::Distributed);
}

#[tokio::test]
async fn active_request_is_not_ready() {
    let h = harness();
    let err = h.distribution.distribute("1").await.unwrap_err();
    assert!(matches!(err, AidError::NotReady { status: RequestStatus::Active, .. }));
    assert_eq!(h.gate.prompts(), 0);
}

#[tokio::test]
async fn declined_confirmation_changes_nothing() {
    let h = harness();
    h.gate.set_answer(false);
    assert_eq!(
        h.distribution.distribute("2").await.unwrap(),
        DistributionOutcome::Declined
    );
    assert_eq!(h.book.get("2").unwrap().status, RequestStatus::Ready);
    assert!(h.store.read_all::<DistributionRecord>(keys::DISTRIBUTIONS).is_empty());
}

#[tokio::test]
async fn unresolvable_distributor_is_unknown() {
    let h = harness();
    h.wallet.set_available(false);
    let DistributionOutcome::Distributed(receipt) = h.distribution.distribute("2").await.unwrap()
    else {
        panic!("expected distribution");
    };
    assert!(receipt.record.distributor.is_unknown());
}

#[tokio::test]
async fn validated_request_can_then_be_distributed() {
    let h = harness();
    for who in 1..=3 {
        h.validate_as(who, "3").await.unwrap();
    }
    assert!(matches!(
        h.distribution.distribute("3").await.unwrap(),
        DistributionOutcome::Distributed(_)
    ));
    assert!(h.book.filter(RequestFilter::Active).iter().all(|r| r.id != "3"));

    let validations: Vec<ValidationRecord> = h.store.read_all(keys::VALIDATIONS);
    let activity = validator_activity(&validations, 10);
    assert_eq!(activity.len(), 3);
}

// ---------------------------------------------------------------------------
// Contributions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contribution_raises_request_and_records_donation() {
    let h = harness();
    h.wallet.accept_next("0xfeed");

    let receipt = h.contribution.contribute("1", "25").await.unwrap();

    assert_eq!(receipt.donation.transaction_id.as_str(), "0xfeed");
    assert_eq!(receipt.request.raised_amount, TokenAmount::from_units(1_825));
    assert_eq!(
        h.stored_request("1").unwrap().raised_amount,
        TokenAmount::from_units(1_825)
    );

    let donations: Vec<DonationRecord> = h.store.read_all(keys::DONATIONS);
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].category, "Medical");
    assert_eq!(
        donations[0].message,
        "Contribution to request 1 - Emergency Medical Aid - Jakarta"
    );
    assert_eq!(donations[0].derived_reward, TokenAmount::parse("1.25").unwrap());
}

#[tokio::test]
async fn rejected_contribution_leaves_request_untouched() {
    let h = harness();
    h.wallet.reject_next("user cancelled");
    let err = h.contribution.contribute("1", "25").await.unwrap_err();
    assert_eq!(err, AidError::TransactionRejected("user cancelled".into()));
    assert_eq!(
        h.book.get("1").unwrap().raised_amount,
        TokenAmount::from_units(1_800)
    );
}

#[tokio::test]
async fn contribution_checks_request_first() {
    let h = harness();
    assert_eq!(
        h.contribution.contribute("42", "5").await.unwrap_err(),
        AidError::UnknownRequest("42".into())
    );

    h.distribution.distribute("2").await.unwrap();
    assert_eq!(
        h.contribution.contribute("2", "5").await.unwrap_err(),
        AidError::RequestClosed("2".into())
    );
    assert!(matches!(
        h.contribution.contribute("1", "0.1").await.unwrap_err(),
        AidError::InvalidAmount(_)
    ));
    assert_eq!(h.wallet.submit_calls(), 0);
}
