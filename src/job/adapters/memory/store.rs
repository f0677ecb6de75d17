//! Process-local job store.
//!
//! Jobs live only as long as the process; nothing is persisted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::job::{
    domain::{Job, JobId, QueueHealth},
    ports::{JobMutation, JobStore, JobStoreError, JobStoreResult},
};

/// Thread-safe in-memory job store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    state: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl InMemoryJobStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> JobStoreError {
    JobStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn insert(&self, job: &Job) -> JobStoreResult<()> {
        let mut jobs = self.state.write().map_err(lock_error)?;
        if jobs.contains_key(job.id()) {
            return Err(JobStoreError::DuplicateJob(job.id().clone()));
        }
        jobs.insert(job.id().clone(), job.clone());
        Ok(())
    }

    async fn update(&self, id: &JobId, mutation: JobMutation<'_>) -> JobStoreResult<Job> {
        let mut jobs = self.state.write().map_err(lock_error)?;
        let stored = jobs
            .get_mut(id)
            .ok_or_else(|| JobStoreError::NotFound(id.clone()))?;

        // Mutate a copy so a rejected change leaves the stored job intact.
        let mut candidate = stored.clone();
        mutation(&mut candidate)?;
        *stored = candidate.clone();
        Ok(candidate)
    }

    async fn find_by_id(&self, id: &JobId) -> JobStoreResult<Option<Job>> {
        let jobs = self.state.read().map_err(lock_error)?;
        Ok(jobs.get(id).cloned())
    }

    async fn health_summary(&self) -> JobStoreResult<QueueHealth> {
        let jobs = self.state.read().map_err(lock_error)?;
        Ok(QueueHealth::from_statuses(jobs.values().map(Job::status)))
    }
}
