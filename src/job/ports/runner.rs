//! Runner port executed by the scheduler for each dequeued job.

use super::StageReporter;
use crate::job::domain::TaskDescriptor;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Executes one job to completion.
#[async_trait]
pub trait JobRunner: Send + Sync + 'static {
    /// Runs the work described by `descriptor`, reporting progress along
    /// the way.
    ///
    /// # Errors
    ///
    /// Returns [`JobRunError`] when the run aborts; its message becomes the
    /// job's recorded error.
    async fn run(
        &self,
        descriptor: &TaskDescriptor,
        reporter: &dyn StageReporter,
    ) -> Result<(), JobRunError>;
}

/// Failure that aborted a job run.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct JobRunError(pub Arc<dyn std::error::Error + Send + Sync>);

impl JobRunError {
    /// Wraps the error that aborted the run.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
