//! Stage reporter port used by the pipeline to publish progress.

use crate::job::domain::ProgressUpdate;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Receives progress for the job a pipeline run belongs to.
///
/// The pipeline only knows this interface, never the store behind it.
#[async_trait]
pub trait StageReporter: Send + Sync {
    /// Publishes a progress update.
    ///
    /// # Errors
    ///
    /// Returns [`StageReporterError`] when the update cannot be recorded.
    async fn report(&self, update: ProgressUpdate) -> Result<(), StageReporterError>;
}

/// Error returned when a progress update cannot be recorded.
#[derive(Debug, Clone, Error)]
#[error("failed to record progress: {0}")]
pub struct StageReporterError(pub Arc<dyn std::error::Error + Send + Sync>);

impl StageReporterError {
    /// Wraps the underlying failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
