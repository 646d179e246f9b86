//! Block explorer links.

use aidchain_types::TransactionId;

/// `{base}/transactions/{tx}`; a trailing `/` on `base` is ignored.
pub fn explorer_url(base: &str, tx: &TransactionId) -> String {
    format!("{}/transactions/{}", base.trim_end_matches('/'), tx)
}
