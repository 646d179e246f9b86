//! Nullable clock: deterministic time for testing.

use aidchain_types::{Clock, Timestamp};
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
#[derive(Debug)]
pub struct NullClock {
    current: AtomicU64,
}

impl NullClock {
    pub fn new(initial_millis: u64) -> Self {
        Self {
            current: AtomicU64::new(initial_millis),
        }
    }

    /// Advance time by a number of milliseconds.
    pub fn advance(&self, millis: u64) {
        self.current.fetch_add(millis, Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, millis: u64) {
        self.current.store(millis, Ordering::SeqCst);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(1_700_000_000_000)
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.current.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_moves_when_told() {
        let clock = NullClock::new(1_000);
        assert_eq!(clock.now().as_millis(), 1_000);
        clock.advance(250);
        assert_eq!(clock.now().as_millis(), 1_250);
        clock.set(5);
        assert_eq!(clock.now().as_millis(), 5);
    }
}
