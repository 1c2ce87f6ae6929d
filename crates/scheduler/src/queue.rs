//! A deduplicating, mutex-protected job queue.
//!
//! Many producers (ticker pollers) add jobs concurrently; a single
//! drainer (the processor) periodically takes the whole batch. Adding a
//! job whose identity already sits in the queue replaces it in place —
//! the queue always holds at most one, most recent, request per
//! identity.

use crate::job::{JobIdentity, OptionJob};
use std::collections::HashMap;
use std::sync::Mutex;

/// The shared job queue.
pub struct JobQueue {
    inner: Mutex<HashMap<JobIdentity, OptionJob>>,
}

impl JobQueue {
    /// An empty queue.
    pub fn new() -> Self {
        JobQueue {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Inserts `job`, replacing any existing job with the same identity.
    pub fn add_or_replace(&self, job: OptionJob) {
        let identity = job.identity();
        self.inner
            .lock()
            .expect("job queue mutex poisoned")
            .insert(identity, job);
    }

    /// Number of distinct jobs currently queued.
    pub fn size(&self) -> usize {
        self.inner.lock().expect("job queue mutex poisoned").len()
    }

    /// Whether a job with this identity is currently queued.
    pub fn contains(&self, identity: &JobIdentity) -> bool {
        self.inner
            .lock()
            .expect("job queue mutex poisoned")
            .contains_key(identity)
    }

    /// Removes and returns every queued job.
    ///
    /// Jobs added concurrently with a `drain` may or may not be
    /// included; they are never lost, since insertion takes the same
    /// lock.
    pub fn drain(&self) -> Vec<OptionJob> {
        self.inner
            .lock()
            .expect("job queue mutex poisoned")
            .drain()
            .map(|(_, job)| job)
            .collect()
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}
