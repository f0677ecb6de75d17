//! Sequential scheduler: one job executes at a time, in submission order.
//!
//! Submissions go through a cheap [`JobScheduler`] handle that registers the
//! job and pushes its identifier onto an unbounded channel, so enqueueing
//! never waits on a running pipeline. A single driver task owns the
//! receiving end; it sleeps on the channel while idle and runs each
//! dequeued job to completion before looking at the next one. Because only
//! one driver can ever own the receiver, two loops cannot run at once.

use super::tracker::{JobTracker, SubmissionOutcome};
use crate::job::{
    domain::{JobId, TaskDescriptor},
    ports::{JobRunner, JobStore, JobStoreError},
};
use mockable::Clock;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Errors returned when submitting work to the scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The job could not be registered.
    #[error(transparent)]
    Store(#[from] JobStoreError),
    /// The driver loop has stopped and can no longer accept work.
    #[error("scheduler has stopped; job {0} was registered but not queued")]
    Stopped(JobId),
}

/// Submission handle for the sequential scheduler.
pub struct JobScheduler<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    tracker: JobTracker<S, C>,
    sender: mpsc::UnboundedSender<JobId>,
}

impl<S, C> Clone for JobScheduler<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<S, C> JobScheduler<S, C>
where
    S: JobStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Spawns the driver loop and returns the submission handle with the
    /// driver's join handle.
    ///
    /// The driver stops once every [`JobScheduler`] clone has been dropped
    /// and the pending queue has drained.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn start<R>(tracker: JobTracker<S, C>, runner: Arc<R>) -> (Self, JoinHandle<()>)
    where
        R: JobRunner,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let driver = SchedulerDriver {
            tracker: tracker.clone(),
            runner,
            receiver,
        };
        let handle = tokio::spawn(driver.run());
        (Self { tracker, sender }, handle)
    }

    /// Registers a descriptor and queues it for execution.
    ///
    /// Returns immediately; execution happens on the driver task. A
    /// descriptor whose `(task, round, nonce)` is already known yields
    /// [`SubmissionOutcome::AlreadyKnown`] and is not queued again.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Store`] when registration fails and
    /// [`SchedulerError::Stopped`] when the driver is gone.
    pub async fn submit(
        &self,
        descriptor: TaskDescriptor,
    ) -> Result<SubmissionOutcome, SchedulerError> {
        let outcome = self.tracker.register(descriptor).await?;
        match &outcome {
            SubmissionOutcome::Queued(job_id) => {
                self.sender
                    .send(job_id.clone())
                    .map_err(|rejected| SchedulerError::Stopped(rejected.0))?;
                info!(job_id = %job_id, "job queued");
            }
            SubmissionOutcome::AlreadyKnown { job_id, status } => {
                warn!(job_id = %job_id, status = %status, "duplicate submission ignored");
            }
        }
        Ok(outcome)
    }

    /// Returns the tracker used for registration and state changes.
    #[must_use]
    pub const fn tracker(&self) -> &JobTracker<S, C> {
        &self.tracker
    }
}

struct SchedulerDriver<S, C, R>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    tracker: JobTracker<S, C>,
    runner: Arc<R>,
    receiver: mpsc::UnboundedReceiver<JobId>,
}

impl<S, C, R> SchedulerDriver<S, C, R>
where
    S: JobStore + 'static,
    C: Clock + Send + Sync + 'static,
    R: JobRunner,
{
    async fn run(mut self) {
        info!("scheduler started");
        while let Some(job_id) = self.receiver.recv().await {
            self.process(&job_id).await;
        }
        info!("scheduler stopped");
    }

    async fn process(&self, job_id: &JobId) {
        let job = match self.tracker.mark_active(job_id).await {
            Ok(job) => job,
            Err(err) => {
                error!(job_id = %job_id, error = %err, "could not activate job");
                return;
            }
        };
        info!(
            job_id = %job_id,
            task = %job.descriptor().task(),
            round = job.descriptor().round().number(),
            "processing job"
        );

        let outcome = self.execute(job.descriptor().clone(), job_id.clone()).await;
        let recorded = match outcome {
            Ok(()) => {
                info!(job_id = %job_id, "job completed");
                self.tracker.mark_completed(job_id).await
            }
            Err(message) => {
                error!(job_id = %job_id, error = %message, "job failed");
                self.tracker.mark_failed(job_id, &message).await
            }
        };
        if let Err(err) = recorded {
            error!(job_id = %job_id, error = %err, "could not record job outcome");
        }
    }

    /// Runs the job on its own task so a panic is contained to that job.
    async fn execute(&self, descriptor: TaskDescriptor, job_id: JobId) -> Result<(), String> {
        let runner = Arc::clone(&self.runner);
        let reporter = self.tracker.reporter_for(job_id);
        let handle = tokio::spawn(async move { runner.run(&descriptor, &reporter).await });

        match handle.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(err.to_string()),
            Err(join_error) if join_error.is_panic() => {
                let payload = join_error.into_panic();
                Err(panic_message(&*payload))
            }
            Err(join_error) => Err(join_error.to_string()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned());
    format!("job panicked: {detail}")
}
