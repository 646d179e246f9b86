//! Interactive confirmation on the terminal.

use std::io::{BufRead, Write};

use async_trait::async_trait;

use aidchain_types::DistributionRequest;
use aidchain_wallet_core::ConfirmationGate;

/// Asks on stderr and reads the answer from stdin. Anything but `y`/`yes`
/// declines.
pub struct StdinConfirmation;

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl ConfirmationGate for StdinConfirmation {
    async fn confirm_distribution(&self, request: &DistributionRequest) -> bool {
        let prompt = format!(
            "Mark \"{}\" as distributed? This is recorded locally and cannot be undone. [y/N] ",
            request.title
        );
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "{prompt}");
            let _ = stderr.flush();
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_yes(&line),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "could not read confirmation, declining");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "confirmation prompt failed, declining");
                false
            }
        }
    }
}
