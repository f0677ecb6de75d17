//! Job identity and state tracking on top of a [`JobStore`].

use crate::job::{
    domain::{Job, JobId, JobStatus, ProgressUpdate, QueueHealth, TaskDescriptor},
    ports::{JobStore, JobStoreError, JobStoreResult, StageReporter, StageReporterError},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Outcome of registering a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A new waiting job was created and queued.
    Queued(JobId),
    /// A job for the same `(task, round, nonce)` already exists.
    ///
    /// The existing job is left untouched and is not queued again.
    AlreadyKnown {
        /// Identifier of the existing job.
        job_id: JobId,
        /// Status of the existing job at lookup time.
        status: JobStatus,
    },
}

impl SubmissionOutcome {
    /// Returns the job identifier regardless of outcome.
    #[must_use]
    pub const fn job_id(&self) -> &JobId {
        match self {
            Self::Queued(job_id) | Self::AlreadyKnown { job_id, .. } => job_id,
        }
    }

    /// Returns whether a new job was queued.
    #[must_use]
    pub const fn is_queued(&self) -> bool {
        matches!(self, Self::Queued(_))
    }
}

fn same_identity(left: &TaskDescriptor, right: &TaskDescriptor) -> bool {
    left.task() == right.task() && left.round() == right.round() && left.nonce() == right.nonce()
}

/// Creates jobs and funnels every state change through the store.
pub struct JobTracker<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for JobTracker<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> JobTracker<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    /// Creates a tracker over a store.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a waiting job for the descriptor unless its identity is
    /// already known.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::IdentityConflict`] when the identifier is
    /// held by a job for another `(task, round, nonce)`, and
    /// [`JobStoreError`] when the store fails.
    pub async fn register(&self, descriptor: TaskDescriptor) -> JobStoreResult<SubmissionOutcome> {
        let job = Job::new(descriptor, &*self.clock);
        match self.store.insert(&job).await {
            Ok(()) => Ok(SubmissionOutcome::Queued(job.id().clone())),
            Err(JobStoreError::DuplicateJob(job_id)) => {
                let existing = self
                    .store
                    .find_by_id(&job_id)
                    .await?
                    .ok_or_else(|| JobStoreError::NotFound(job_id.clone()))?;
                if !same_identity(existing.descriptor(), job.descriptor()) {
                    return Err(JobStoreError::IdentityConflict(job_id));
                }
                Ok(SubmissionOutcome::AlreadyKnown {
                    job_id,
                    status: existing.status(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Merges a progress update into an active job.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::NotFound`] for unknown jobs and
    /// [`JobStoreError::Domain`] when the job is not active.
    pub async fn update(&self, job_id: &JobId, update: &ProgressUpdate) -> JobStoreResult<Job> {
        let clock = &*self.clock;
        self.store
            .update(job_id, &|job: &mut Job| job.record_progress(update, clock))
            .await
    }

    /// Moves a waiting job to active.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::Domain`] for an illegal transition.
    pub async fn mark_active(&self, job_id: &JobId) -> JobStoreResult<Job> {
        let clock = &*self.clock;
        self.store
            .update(job_id, &|job: &mut Job| job.mark_active(clock))
            .await
    }

    /// Marks an active job as completed.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::Domain`] for an illegal transition.
    pub async fn mark_completed(&self, job_id: &JobId) -> JobStoreResult<Job> {
        let clock = &*self.clock;
        self.store
            .update(job_id, &|job: &mut Job| job.mark_completed(clock))
            .await
    }

    /// Marks an active job as failed with an error message.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError::Domain`] for an illegal transition.
    pub async fn mark_failed(&self, job_id: &JobId, error: &str) -> JobStoreResult<Job> {
        let clock = &*self.clock;
        self.store
            .update(job_id, &|job: &mut Job| job.mark_failed(error, clock))
            .await
    }

    /// Returns a job by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError`] when the store fails.
    pub async fn get(&self, job_id: &JobId) -> JobStoreResult<Option<Job>> {
        self.store.find_by_id(job_id).await
    }

    /// Counts known jobs per status.
    ///
    /// # Errors
    ///
    /// Returns [`JobStoreError`] when the store fails.
    pub async fn health_summary(&self) -> JobStoreResult<QueueHealth> {
        self.store.health_summary().await
    }

    /// Returns a stage reporter bound to one job.
    #[must_use]
    pub fn reporter_for(&self, job_id: JobId) -> JobStageReporter<S, C> {
        JobStageReporter {
            tracker: self.clone(),
            job_id,
        }
    }
}

/// Store-backed [`StageReporter`] bound to a single job.
pub struct JobStageReporter<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    tracker: JobTracker<S, C>,
    job_id: JobId,
}

#[async_trait]
impl<S, C> StageReporter for JobStageReporter<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    async fn report(&self, update: ProgressUpdate) -> Result<(), StageReporterError> {
        debug!(
            job_id = %self.job_id,
            stage = %update.stage(),
            progress = update.progress().percent(),
            message = update.message(),
            "stage progress"
        );
        self.tracker
            .update(&self.job_id, &update)
            .await
            .map(|_| ())
            .map_err(StageReporterError::new)
    }
}
