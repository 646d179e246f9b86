//! Request list filters.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use aidchain_types::{DistributionRequest, RequestStatus, Urgency};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RequestFilter {
    #[default]
    All,
    Active,
    Ready,
    HighPriority,
}

impl RequestFilter {
    pub const ALL: [RequestFilter; 4] = [Self::All, Self::Active, Self::Ready, Self::HighPriority];

    pub fn matches(&self, request: &DistributionRequest) -> bool {
        match self {
            Self::All => true,
            Self::Active => request.status == RequestStatus::Active,
            Self::Ready => request.status == RequestStatus::Ready,
            Self::HighPriority => request.urgency == Urgency::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Ready => "ready",
            Self::HighPriority => "high",
        }
    }
}

impl fmt::Display for RequestFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "ready" => Ok(Self::Ready),
            "high" | "high-priority" => Ok(Self::HighPriority),
            other => Err(format!("unknown filter {other:?} (expected all, active, ready or high)")),
        }
    }
}

/// How many requests each filter matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RequestCounts {
    pub all: usize,
    pub active: usize,
    pub ready: usize,
    pub high_priority: usize,
}

impl RequestCounts {
    pub fn tally<'a>(requests: impl IntoIterator<Item = &'a DistributionRequest>) -> Self {
        let mut counts = Self::default();
        for request in requests {
            counts.all += 1;
            counts.active += RequestFilter::Active.matches(request) as usize;
            counts.ready += RequestFilter::Ready.matches(request) as usize;
            counts.high_priority += RequestFilter::HighPriority.matches(request) as usize;
        }
        counts
    }

    pub fn get(&self, filter: RequestFilter) -> usize {
        match filter {
            RequestFilter::All => self.all,
            RequestFilter::Active => self.active,
            RequestFilter::Ready => self.ready,
            RequestFilter::HighPriority => self.high_priority,
        }
    }
}
