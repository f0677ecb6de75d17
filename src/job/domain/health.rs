//! Aggregate queue health projection.

use super::JobStatus;
use serde::{Deserialize, Serialize};

/// Number of known jobs per lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueHealth {
    /// Jobs waiting for the scheduler.
    pub waiting: usize,
    /// Jobs currently executing.
    pub active: usize,
    /// Jobs finished successfully.
    pub completed: usize,
    /// Jobs that failed.
    pub failed: usize,
}

impl QueueHealth {
    /// Builds counts from a sequence of statuses.
    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = JobStatus>) -> Self {
        statuses
            .into_iter()
            .fold(Self::default(), |mut health, status| {
                match status {
                    JobStatus::Waiting => health.waiting += 1,
                    JobStatus::Active => health.active += 1,
                    JobStatus::Completed => health.completed += 1,
                    JobStatus::Failed => health.failed += 1,
                }
                health
            })
    }

    /// Returns the number of known jobs.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.waiting + self.active + self.completed + self.failed
    }
}
