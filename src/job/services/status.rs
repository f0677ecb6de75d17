//! Read-only status projections for external pollers.

use crate::job::{
    domain::{JobId, JobSnapshot, QueueHealth},
    ports::{JobStore, JobStoreError},
};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by status queries.
#[derive(Debug, Error)]
pub enum StatusQueryError {
    /// No job exists with the given identifier.
    #[error("job {0} not found")]
    NotFound(JobId),
    /// The store could not be read.
    #[error(transparent)]
    Store(#[from] JobStoreError),
}

/// Read-only view over the job store.
///
/// Holds no mutation capability: it can only project job state.
pub struct StatusReporter<S>
where
    S: JobStore,
{
    store: Arc<S>,
}

impl<S> Clone for StatusReporter<S>
where
    S: JobStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> StatusReporter<S>
where
    S: JobStore,
{
    /// Creates a reporter over a store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the snapshot of one job.
    ///
    /// # Errors
    ///
    /// Returns [`StatusQueryError::NotFound`] for unknown identifiers.
    pub async fn job_status(&self, job_id: &JobId) -> Result<JobSnapshot, StatusQueryError> {
        self.store
            .find_by_id(job_id)
            .await?
            .map(|job| JobSnapshot::from(&job))
            .ok_or_else(|| StatusQueryError::NotFound(job_id.clone()))
    }

    /// Returns job counts per status across all known jobs.
    ///
    /// # Errors
    ///
    /// Returns [`StatusQueryError::Store`] when the store fails.
    pub async fn queue_health(&self) -> Result<QueueHealth, StatusQueryError> {
        Ok(self.store.health_summary().await?)
    }
}
