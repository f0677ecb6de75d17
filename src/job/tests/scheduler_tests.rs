//! Tests for the sequential scheduler driver loop.

use super::support::{descriptor, wait_for_terminal};
use crate::job::{
    adapters::memory::InMemoryJobStore,
    domain::{JobStage, JobStatus, ProgressUpdate, TaskDescriptor},
    ports::{JobRunError, JobRunner, JobStore, StageReporter},
    services::{JobScheduler, JobTracker, SubmissionOutcome},
};
use async_trait::async_trait;
use eyre::{Result, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

type TestScheduler = JobScheduler<InMemoryJobStore, DefaultClock>;

#[derive(Debug, thiserror::Error)]
#[error("scripted failure for {0}")]
struct ScriptedFailure(String);

/// Runner whose behaviour is chosen by the task name prefix:
/// `fail-*` returns an error, `panic-*` panics, `gated-*` waits for a
/// permit, anything else reports one stage and succeeds.
struct ScriptedRunner {
    store: Arc<InMemoryJobStore>,
    gate: Arc<Semaphore>,
    runs: Mutex<Vec<String>>,
    max_active: Mutex<usize>,
}

impl ScriptedRunner {
    fn new(store: Arc<InMemoryJobStore>) -> Self {
        Self {
            store,
            gate: Arc::new(Semaphore::new(0)),
            runs: Mutex::new(Vec::new()),
            max_active: Mutex::new(0),
        }
    }

    fn runs(&self) -> Vec<String> {
        self.runs.lock().expect("runs lock").clone()
    }

    fn max_active(&self) -> usize {
        *self.max_active.lock().expect("active lock")
    }
}

#[async_trait]
impl JobRunner for ScriptedRunner {
    async fn run(
        &self,
        descriptor: &TaskDescriptor,
        reporter: &dyn StageReporter,
    ) -> Result<(), JobRunError> {
        let name = descriptor.task().as_str().to_owned();
        self.runs.lock().expect("runs lock").push(name.clone());

        let active = self
            .store
            .health_summary()
            .await
            .map_err(JobRunError::new)?
            .active;
        {
            let mut max_active = self.max_active.lock().expect("active lock");
            *max_active = (*max_active).max(active);
        }

        if name.starts_with("gated-") {
            let permit = self.gate.acquire().await.map_err(JobRunError::new)?;
            permit.forget();
        }
        if name.starts_with("panic-") {
            panic!("runner exploded on {name}");
        }
        if name.starts_with("fail-") {
            return Err(JobRunError::new(ScriptedFailure(name)));
        }
        reporter
            .report(ProgressUpdate::new(JobStage::GeneratingHtml, 10, "working"))
            .await
            .map_err(JobRunError::new)?;
        Ok(())
    }
}

struct Harness {
    store: Arc<InMemoryJobStore>,
    runner: Arc<ScriptedRunner>,
    scheduler: TestScheduler,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryJobStore::new());
    let runner = Arc::new(ScriptedRunner::new(Arc::clone(&store)));
    let tracker = JobTracker::new(Arc::clone(&store), Arc::new(DefaultClock));
    let (scheduler, _driver) = JobScheduler::start(tracker, Arc::clone(&runner));
    Harness {
        store,
        runner,
        scheduler,
    }
}

async fn submit(harness: &Harness, task: &str) -> Result<SubmissionOutcome> {
    Ok(harness.scheduler.submit(descriptor(task, 1, "n1")?).await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn jobs_run_in_submission_order(harness: Harness) -> Result<()> {
    let first = submit(&harness, "alpha").await?;
    let second = submit(&harness, "beta").await?;
    let third = submit(&harness, "gamma").await?;

    for outcome in [&first, &second, &third] {
        let job = wait_for_terminal(&harness.store, outcome.job_id()).await?;
        ensure!(job.status() == JobStatus::Completed);
        ensure!(job.progress().percent() == 100);
    }
    ensure!(harness.runner.runs() == vec!["alpha", "beta", "gamma"]);
    ensure!(harness.runner.max_active() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_is_accepted_while_a_job_runs(harness: Harness) -> Result<()> {
    let blocked = submit(&harness, "gated-first").await?;
    let queued = submit(&harness, "second").await?;

    ensure!(queued.is_queued());
    let health = harness.store.health_summary().await?;
    ensure!(health.active <= 1);
    ensure!(health.total() == 2);

    harness.runner.gate.add_permits(1);
    let first_job = wait_for_terminal(&harness.store, blocked.job_id()).await?;
    let second_job = wait_for_terminal(&harness.store, queued.job_id()).await?;

    ensure!(first_job.status() == JobStatus::Completed);
    ensure!(second_job.status() == JobStatus::Completed);
    ensure!(harness.runner.max_active() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_job_is_recorded_and_loop_continues(harness: Harness) -> Result<()> {
    let failing = submit(&harness, "fail-build").await?;
    let next = submit(&harness, "after-failure").await?;

    let failed = wait_for_terminal(&harness.store, failing.job_id()).await?;
    let completed = wait_for_terminal(&harness.store, next.job_id()).await?;

    ensure!(failed.status() == JobStatus::Failed);
    ensure!(failed.stage() == JobStage::Failed);
    ensure!(failed.progress().percent() == 0);
    ensure!(failed.error() == Some("scripted failure for fail-build"));
    ensure!(completed.status() == JobStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn panicking_job_is_recorded_and_loop_continues(harness: Harness) -> Result<()> {
    let panicking = submit(&harness, "panic-build").await?;
    let next = submit(&harness, "after-panic").await?;

    let failed = wait_for_terminal(&harness.store, panicking.job_id()).await?;
    let completed = wait_for_terminal(&harness.store, next.job_id()).await?;

    ensure!(failed.status() == JobStatus::Failed);
    ensure!(failed.error() == Some("job panicked: runner exploded on panic-build"));
    ensure!(completed.status() == JobStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_submission_is_not_rerun(harness: Harness) -> Result<()> {
    let first = submit(&harness, "once").await?;
    wait_for_terminal(&harness.store, first.job_id()).await?;

    let again = submit(&harness, "once").await?;

    ensure!(
        again
            == SubmissionOutcome::AlreadyKnown {
                job_id: first.job_id().clone(),
                status: JobStatus::Completed,
            }
    );
    ensure!(harness.store.health_summary().await?.total() == 1);
    ensure!(harness.runner.runs() == vec!["once"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn driver_stops_when_every_handle_is_dropped() -> Result<()> {
    let store = Arc::new(InMemoryJobStore::new());
    let runner = Arc::new(ScriptedRunner::new(Arc::clone(&store)));
    let tracker = JobTracker::new(Arc::clone(&store), Arc::new(DefaultClock));
    let (scheduler, driver) = JobScheduler::start(tracker, runner);

    let outcome = scheduler.submit(descriptor("last", 1, "n1")?).await?;
    drop(scheduler);
    driver.await?;

    let job = store.find_by_id(outcome.job_id()).await?;
    ensure!(job.map(|found| found.status()) == Some(JobStatus::Completed));
    Ok(())
}
