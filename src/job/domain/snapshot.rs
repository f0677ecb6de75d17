//! Read-only job projection exposed to pollers.

use super::{Job, JobId, JobStage, JobStatus, Progress};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    /// Job identifier.
    pub task_id: JobId,
    /// Lifecycle status.
    pub status: JobStatus,
    /// Current pipeline stage.
    pub stage: JobStage,
    /// Completion percentage.
    pub progress: Progress,
    /// Current step description.
    pub message: String,
    /// Repository URL, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    /// Public hosting URL, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_url: Option<String>,
    /// Latest file-writing commit, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    /// Failure message for failed jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Job> for JobSnapshot {
    fn from(job: &Job) -> Self {
        Self {
            task_id: job.id().clone(),
            status: job.status(),
            stage: job.stage(),
            progress: job.progress(),
            message: job.message().to_owned(),
            repository_url: job.result().repository_url().map(str::to_owned),
            pages_url: job.result().pages_url().map(str::to_owned),
            commit_sha: job.result().commit_sha().map(str::to_owned),
            error: job.error().map(str::to_owned),
            created_at: job.created_at(),
            updated_at: job.updated_at(),
        }
    }
}
