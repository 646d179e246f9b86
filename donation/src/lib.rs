//! Donations: submitting them through the wallet and folding the recorded
//! results into leaderboards and statistics.

pub mod leaderboard;
pub mod stats;
pub mod submission;

pub use leaderboard::{aggregate, LeaderboardEntry};
pub use stats::{category_totals, donation_stats, recent, CategoryTotal, DonationStats};
pub use submission::{parse_amount, DonationReceipt, DonationSubmissionFlow};
