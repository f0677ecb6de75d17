//! Shared fixtures for job tests.

use crate::job::{
    adapters::memory::InMemoryJobStore,
    domain::{Job, JobDomainError, JobId, Nonce, Round, TaskDescriptor, TaskName},
    ports::JobStore,
};
use eyre::{Result, bail};
use std::time::Duration;

pub(super) fn descriptor(task: &str, round: u64, nonce: &str) -> Result<TaskDescriptor, JobDomainError> {
    Ok(TaskDescriptor::new(
        "dev@example.com",
        TaskName::new(task)?,
        Round::try_from(round)?,
        Nonce::new(nonce)?,
        "Build a calculator with basic arithmetic",
    ))
}

/// Polls the store until the job reaches a terminal status.
pub(super) async fn wait_for_terminal(store: &InMemoryJobStore, job_id: &JobId) -> Result<Job> {
    for _ in 0..500 {
        if let Some(job) = store.find_by_id(job_id).await? {
            if job.status().is_terminal() {
                return Ok(job);
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    bail!("job {job_id} did not finish in time")
}
