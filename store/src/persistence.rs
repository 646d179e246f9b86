//! Outcome of mirroring a flow's result into local storage.

use crate::StoreError;

/// Whether the local mirror of a flow's result was written.
///
/// Storage is best-effort: a failed write never fails the flow, but it is
/// reported here so callers (and tests) can see the degraded mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Persistence {
    Stored,
    Degraded(String),
}

impl Persistence {
    /// Convert a store result, logging the failure.
    pub fn from_result(result: Result<(), StoreError>, key: &str) -> Self {
        match result {
            Ok(()) => Self::Stored,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to persist record locally");
                Self::Degraded(e.to_string())
            }
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }

    /// Combine two writes: degraded if either was.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Stored, Self::Stored) => Self::Stored,
            (Self::Degraded(a), Self::Stored) | (Self::Stored, Self::Degraded(a)) => {
                Self::Degraded(a)
            }
            (Self::Degraded(a), Self::Degraded(b)) => Self::Degraded(format!("{a}; {b}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_write_is_degraded() {
        let p = Persistence::from_result(Err(StoreError::Backend("full".into())), "k");
        assert!(!p.is_stored());
        assert!(matches!(p, Persistence::Degraded(ref m) if m.contains("full")));
    }

    #[test]
    fn and_keeps_the_worst_outcome() {
        assert_eq!(Persistence::Stored.and(Persistence::Stored), Persistence::Stored);
        let degraded = Persistence::Stored.and(Persistence::Degraded("x".into()));
        assert_eq!(degraded, Persistence::Degraded("x".into()));
    }
}
