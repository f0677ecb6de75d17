//! Store port owning every job's mutable state.

use crate::job::domain::{Job, JobDomainError, JobId, QueueHealth};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job store operations.
pub type JobStoreResult<T> = Result<T, JobStoreError>;

/// In-place mutation applied to a stored job while the store holds its
/// write guard.
pub type JobMutation<'a> = &'a (dyn Fn(&mut Job) -> Result<(), JobDomainError> + Send + Sync);

/// Job state storage contract.
///
/// The store is the single writer of job state: callers never hold a
/// second writable copy, they hand the store a mutation instead. Reads
/// return clones taken under the store's guard, so a reader never sees a
/// half-applied mutation.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Stores a new job.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::DuplicateJob`] when a job with the same
    /// identifier already exists.
    async fn insert(&self, job: &Job) -> JobStoreResult<()>;

    /// Applies a mutation to an existing job and returns the updated job.
    ///
    /// A mutation that fails leaves the stored job untouched.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::NotFound`] when the job does not exist and
    /// [`JobStoreError::Domain`] when the mutation rejects the change.
    async fn update(&self, id: &JobId, mutation: JobMutation<'_>) -> JobStoreResult<Job>;

    /// Finds a job by identifier.
    ///
    /// Returns `None` when the job does not exist.
    async fn find_by_id(&self, id: &JobId) -> JobStoreResult<Option<Job>>;

    /// Counts known jobs per status.
    async fn health_summary(&self) -> JobStoreResult<QueueHealth>;
}

/// Errors returned by job store implementations.
#[derive(Debug, Clone, Error)]
pub enum JobStoreError {
    /// A job with the same identifier already exists.
    #[error("duplicate job identifier: {0}")]
    DuplicateJob(JobId),

    /// The derived identifier is held by a job for a different
    /// `(task, round, nonce)`.
    #[error("job identifier {0} already belongs to a different request")]
    IdentityConflict(JobId),

    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// The domain rejected the requested mutation.
    #[error(transparent)]
    Domain(#[from] JobDomainError),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobStoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
