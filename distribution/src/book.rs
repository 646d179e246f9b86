//! The request book: working copy of every distribution request.
//!
//! Mutations go through [`RequestBook::update`], which edits one aggregate
//! (validators, raised amount and status together) and then re-synchronises
//! the whole snapshot list to storage in a single write.
//!
//! Flows that suspend on the wallet between reading and updating a request
//! hold [`RequestBook::lock_request`] for the duration. Operations on
//! different requests proceed concurrently; operations on the same request
//! are serialised.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};

use aidchain_store::{keys, Persistence, RecordStore};
use aidchain_types::{AidError, DistributionRequest};

use crate::filter::{RequestCounts, RequestFilter};
use crate::seed::initial_requests;

pub struct RequestBook {
    store: Arc<RecordStore>,
    requests: StdMutex<Vec<DistributionRequest>>,
    /// Cleared when the stored snapshot could not be read, so the fallback
    /// copy never replaces it.
    persist: bool,
    /// Per-request mutexes
    request_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RequestBook {
    /// Load the stored snapshot, seeding the built-in requests when nothing
    /// has been stored yet.
    ///
    /// An unreadable snapshot also starts from the built-in requests, but only
    /// in memory: the stored list is left as it is.
    pub fn load(store: Arc<RecordStore>) -> Self {
        match store.try_read_all::<DistributionRequest>(keys::REQUESTS) {
            Ok(stored) if stored.is_empty() => {
                tracing::info!("no stored requests, seeding initial requests");
                let seeded = Self::with_requests(store, initial_requests());
                seeded.sync();
                seeded
            }
            Ok(stored) => {
                tracing::debug!(count = stored.len(), "loaded stored requests");
                Self::with_requests(store, stored)
            }
            Err(e) => {
                tracing::warn!(
                    key = keys::REQUESTS,
                    error = %e,
                    "failed to read stored requests, using initial requests without saving"
                );
                Self {
                    persist: false,
                    ..Self::with_requests(store, initial_requests())
                }
            }
        }
    }

    /// A book over `requests`, without touching storage.
    pub fn with_requests(store: Arc<RecordStore>, requests: Vec<DistributionRequest>) -> Self {
        Self {
            store,
            requests: StdMutex::new(requests),
            persist: true,
            request_locks: Mutex::new(HashMap::new()),
        }
    }

    fn working_copy(&self) -> std::sync::MutexGuard<'_, Vec<DistributionRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, id: &str) -> Option<DistributionRequest> {
        self.working_copy().iter().find(|r| r.id == id).cloned()
    }

    /// Like [`get`](Self::get), failing with `UnknownRequest`.
    pub fn require(&self, id: &str) -> Result<DistributionRequest, AidError> {
        self.get(id)
            .ok_or_else(|| AidError::UnknownRequest(id.to_string()))
    }

    pub fn list(&self) -> Vec<DistributionRequest> {
        self.working_copy().clone()
    }

    pub fn filter(&self, filter: RequestFilter) -> Vec<DistributionRequest> {
        self.working_copy()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> RequestCounts {
        RequestCounts::tally(self.working_copy().iter())
    }

    /// Get or create the lock for one request.
    async fn request_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.request_locks.lock().await;
        locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Exclusive access to one request until the guard is dropped.
    pub async fn lock_request(&self, id: &str) -> OwnedMutexGuard<()> {
        self.request_lock(id).await.lock_owned().await
    }

    /// Apply `f` to the request `id` and persist the new snapshot.
    ///
    /// `f` works on a copy: if it fails, the working copy and storage are
    /// left as they were. The snapshot write is best effort.
    pub fn update<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut DistributionRequest) -> Result<R, AidError>,
    ) -> Result<(R, DistributionRequest, Persistence), AidError> {
        let mut requests = self.working_copy();
        let slot = requests
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AidError::UnknownRequest(id.to_string()))?;

        let mut updated = requests[slot].clone();
        let result = f(&mut updated)?;
        requests[slot] = updated.clone();

        let persistence = self.write_snapshot(&requests);
        Ok((result, updated, persistence))
    }

    /// Write the current working copy to storage.
    pub fn sync(&self) -> Persistence {
        let requests = self.working_copy();
        self.write_snapshot(&requests)
    }

    fn write_snapshot(&self, requests: &[DistributionRequest]) -> Persistence {
        if !self.persist {
            tracing::warn!(key = keys::REQUESTS, "stored requests unreadable, snapshot not saved");
            return Persistence::Degraded("stored requests could not be read".into());
        }
        Persistence::from_result(
            self.store.replace_all(keys::REQUESTS, requests),
            keys::REQUESTS,
        )
    }

    /// Drop locks for requests nobody is holding.
    pub async fn cleanup_locks(&self) {
        let mut locks = self.request_locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
