//! Domain model for background jobs.
//!
//! Jobs are keyed by the `(task, round, nonce)` triple of the descriptor
//! that created them. The aggregate owns every lifecycle rule: legal status
//! edges, non-decreasing progress, and result fields that are never cleared
//! once known.

mod descriptor;
mod error;
mod health;
mod ids;
mod job;
mod progress;
mod snapshot;

pub use descriptor::{Attachment, TaskDescriptor};
pub use error::{JobDomainError, ParseJobStatusError};
pub use health::QueueHealth;
pub use ids::{JobId, Nonce, Round, TaskName};
pub use job::{Job, JobResult, JobStatus};
pub use progress::{JobStage, Progress, ProgressUpdate};
pub use snapshot::JobSnapshot;
