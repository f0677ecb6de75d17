//! Error types for job domain validation and lifecycle rules.

use super::{JobId, JobStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating job domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name cannot be used as a repository name.
    #[error(
        "task name '{0}' contains invalid characters (only ASCII letters, digits, '-', '_' and '.' allowed)"
    )]
    InvalidTaskName(String),

    /// The task name is longer than a repository name may be.
    #[error("task name is {0} characters long, at most 100 allowed")]
    TaskNameTooLong(usize),

    /// The nonce is empty after trimming.
    #[error("nonce must not be empty")]
    EmptyNonce,

    /// The nonce would make the derived job identifier ambiguous.
    #[error("nonce '{0}' must not contain 'round-'")]
    AmbiguousNonce(String),

    /// The round number is outside the supported range.
    #[error("invalid round {0}, expected 1 or 2")]
    InvalidRound(u64),

    /// Transitioning between two statuses is not permitted.
    #[error("invalid status transition for job {job_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Job identifier.
        job_id: JobId,
        /// Current status.
        from: JobStatus,
        /// Requested target status.
        to: JobStatus,
    },

    /// Progress was reported for a job that is not running.
    #[error("job {job_id} is {status}; progress can only be recorded while active")]
    ProgressRequiresActive {
        /// Job identifier.
        job_id: JobId,
        /// Current status.
        status: JobStatus,
    },
}

/// Error returned while parsing job statuses from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);
