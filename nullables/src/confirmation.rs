//! Nullable confirmation gate: scripted user answers.

use aidchain_types::DistributionRequest;
use aidchain_wallet_core::ConfirmationGate;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Answers every confirmation prompt with a fixed, switchable reply.
#[derive(Debug)]
pub struct NullConfirmation {
    answer: AtomicBool,
    prompts: AtomicUsize,
}

impl NullConfirmation {
    pub fn accepting() -> Self {
        Self {
            answer: AtomicBool::new(true),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: AtomicBool::new(false),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    /// How many times the user was asked.
    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationGate for NullConfirmation {
    async fn confirm_distribution(&self, _request: &DistributionRequest) -> bool {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.answer.load(Ordering::SeqCst)
    }
}
