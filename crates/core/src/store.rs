//! Storage for finished analyses, keyed by job id.

use crate::types::PresentationAnalysis;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Identifier of one analysis job. Fresh for every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a new random job id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key-value store for analysis results.
///
/// Implementations must allow concurrent readers. Writing the same id twice
/// keeps the last value.
pub trait JobStore: Send + Sync {
    /// Store the result of a job.
    fn put(&self, id: JobId, result: PresentationAnalysis);

    /// Fetch the result of a job, if it exists.
    fn get(&self, id: &JobId) -> Option<PresentationAnalysis>;
}

/// Process-lifetime store backed by a locked map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Arc<RwLock<HashMap<JobId, PresentationAnalysis>>>,
}

impl InMemoryJobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored jobs.
    pub fn len(&self) -> usize {
        self.jobs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the store holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl JobStore for InMemoryJobStore {
    fn put(&self, id: JobId, result: PresentationAnalysis) {
        let mut jobs = self.jobs.write().unwrap_or_else(|poisoned| {
            log::warn!("Job store lock poisoned, recovering");
            poisoned.into_inner()
        });
        jobs.insert(id, result);
    }

    fn get(&self, id: &JobId) -> Option<PresentationAnalysis> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }
}
