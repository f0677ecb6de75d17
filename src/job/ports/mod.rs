//! Port contracts for the job engine.
//!
//! Ports define infrastructure-agnostic interfaces used by job services.

pub mod reporter;
pub mod runner;
pub mod store;

pub use reporter::{StageReporter, StageReporterError};
pub use runner::{JobRunError, JobRunner};
pub use store::{JobMutation, JobStore, JobStoreError, JobStoreResult};
