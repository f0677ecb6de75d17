//! Job aggregate root and related lifecycle types.

use super::{
    JobDomainError, JobId, JobStage, ParseJobStatusError, Progress, ProgressUpdate,
    TaskDescriptor,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Queued, not yet picked up by the scheduler.
    Waiting,
    /// Currently executing.
    Active,
    /// Finished successfully.
    Completed,
    /// Aborted with an error.
    Failed,
}

impl JobStatus {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns whether moving to `target` is a legal lifecycle edge.
    ///
    /// The only edges are `waiting -> active` and
    /// `active -> completed | failed`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Waiting, Self::Active) | (Self::Active, Self::Completed | Self::Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = ParseJobStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "waiting" => Ok(Self::Waiting),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseJobStatusError(value.to_owned())),
        }
    }
}

/// Result fields populated as pipeline stages complete.
///
/// A field, once set, is never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    repository_url: Option<String>,
    pages_url: Option<String>,
    commit_sha: Option<String>,
}

impl JobResult {
    /// Returns the repository URL, if known.
    #[must_use]
    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    /// Returns the public hosting URL, if known.
    #[must_use]
    pub fn pages_url(&self) -> Option<&str> {
        self.pages_url.as_deref()
    }

    /// Returns the latest commit identifier, if known.
    #[must_use]
    pub fn commit_sha(&self) -> Option<&str> {
        self.commit_sha.as_deref()
    }

    fn merge(&mut self, update: &ProgressUpdate) {
        merge_field(&mut self.repository_url, update.repository_url());
        merge_field(&mut self.pages_url, update.pages_url());
        merge_field(&mut self.commit_sha, update.commit_sha());
    }
}

fn merge_field(field: &mut Option<String>, value: Option<&str>) {
    if let Some(new_value) = value {
        *field = Some(new_value.to_owned());
    }
}

/// Job aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    descriptor: TaskDescriptor,
    status: JobStatus,
    stage: JobStage,
    progress: Progress,
    message: String,
    result: JobResult,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates a waiting job for a descriptor.
    #[must_use]
    pub fn new(descriptor: TaskDescriptor, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: descriptor.job_id(),
            descriptor,
            status: JobStatus::Waiting,
            stage: JobStage::Queued,
            progress: Progress::ZERO,
            message: "Task queued for processing".to_owned(),
            result: JobResult::default(),
            error: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> &JobId {
        &self.id
    }

    /// Returns the descriptor the job was created from.
    #[must_use]
    pub const fn descriptor(&self) -> &TaskDescriptor {
        &self.descriptor
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the current pipeline stage.
    #[must_use]
    pub const fn stage(&self) -> JobStage {
        self.stage
    }

    /// Returns the current progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the current step description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the result fields gathered so far.
    #[must_use]
    pub const fn result(&self) -> &JobResult {
        &self.result
    }

    /// Returns the failure message, set only on failed jobs.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves a waiting job to active.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidStatusTransition`] unless the job is
    /// waiting.
    pub fn mark_active(&mut self, clock: &impl Clock) -> Result<(), JobDomainError> {
        self.transition_to(JobStatus::Active)?;
        self.message = "Task processing started".to_owned();
        self.touch(clock);
        Ok(())
    }

    /// Merges a progress update into an active job.
    ///
    /// Progress never moves backwards: a lower milestone keeps the current
    /// value while stage and message still advance.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::ProgressRequiresActive`] when the job is not
    /// active.
    pub fn record_progress(
        &mut self,
        update: &ProgressUpdate,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        if self.status != JobStatus::Active {
            return Err(JobDomainError::ProgressRequiresActive {
                job_id: self.id.clone(),
                status: self.status,
            });
        }

        self.stage = update.stage();
        self.progress = self.progress.max(update.progress());
        update.message().clone_into(&mut self.message);
        self.result.merge(update);
        self.touch(clock);
        Ok(())
    }

    /// Marks an active job as completed.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidStatusTransition`] unless the job is
    /// active.
    pub fn mark_completed(&mut self, clock: &impl Clock) -> Result<(), JobDomainError> {
        self.transition_to(JobStatus::Completed)?;
        self.stage = JobStage::Completed;
        self.progress = Progress::COMPLETE;
        self.message = "Task completed successfully".to_owned();
        self.touch(clock);
        Ok(())
    }

    /// Marks an active job as failed and resets its progress.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidStatusTransition`] unless the job is
    /// active.
    pub fn mark_failed(
        &mut self,
        error: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        self.transition_to(JobStatus::Failed)?;
        let error_message = error.into();
        self.stage = JobStage::Failed;
        self.progress = Progress::ZERO;
        self.message = format!("Task failed: {error_message}");
        self.error = Some(error_message);
        self.touch(clock);
        Ok(())
    }

    fn transition_to(&mut self, target: JobStatus) -> Result<(), JobDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(JobDomainError::InvalidStatusTransition {
                job_id: self.id.clone(),
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
