//! Distribution requests and the flows that move them through their
//! lifecycle.
//!
//! - [`RequestBook`]: in-memory working copy of every request, persisted as
//!   one snapshot list after each mutation
//! - [`ValidationFlow`]: community attestations, quorum promotion
//! - [`ContributionFlow`]: donations earmarked for one request
//! - [`DistributionFlow`]: confirmed, local-only hand-out records
//! - Filters and validator activity for the request views

pub mod activity;
pub mod book;
pub mod contribution;
pub mod distribute;
pub mod engine;
pub mod filter;
pub mod seed;
pub mod validation;

pub use activity::{validator_activity, ValidatorActivity};
pub use book::RequestBook;
pub use contribution::{contribution_message, ContributionFlow, ContributionReceipt};
pub use distribute::{DistributionFlow, DistributionOutcome, DistributionReceipt};
pub use engine::{ValidationEngine, ValidationOutcome};
pub use filter::{RequestCounts, RequestFilter};
pub use seed::initial_requests;
pub use validation::{ValidationFlow, ValidationReceipt};
