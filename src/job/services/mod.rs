//! Job orchestration services.

mod pipeline;
mod scheduler;
mod status;
mod tracker;

pub use pipeline::{PipelineError, TaskPipeline};
pub use scheduler::{JobScheduler, SchedulerError};
pub use status::{StatusQueryError, StatusReporter};
pub use tracker::{JobStageReporter, JobTracker, SubmissionOutcome};
