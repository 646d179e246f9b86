//! Fixed keys of the persisted namespace.

/// Donation records appended after each accepted donation.
pub const DONATIONS: &str = "aidchain.donations";

/// Validation records, one per (request, validator).
pub const VALIDATIONS: &str = "aidchain.validations";

/// Distribution records written when a request is marked distributed.
pub const DISTRIBUTIONS: &str = "aidchain.distributions";

/// Snapshot of every distribution request.
pub const REQUESTS: &str = "aidchain.requests";

/// All keys, in a stable order.
pub const ALL: &[&str] = &[DONATIONS, VALIDATIONS, DISTRIBUTIONS, REQUESTS];
