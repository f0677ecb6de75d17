//! Tests for the in-memory job store and the tracker built on it.

use super::support::descriptor;
use crate::job::{
    adapters::memory::InMemoryJobStore,
    domain::{Job, JobDomainError, JobId, JobStage, JobStatus, ProgressUpdate, QueueHealth},
    ports::{JobMutation, JobStore, JobStoreError, JobStoreResult},
    services::{JobTracker, SubmissionOutcome},
};
use async_trait::async_trait;
use eyre::{Result, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestTracker = JobTracker<InMemoryJobStore, DefaultClock>;

#[fixture]
fn tracker() -> TestTracker {
    JobTracker::new(Arc::new(InMemoryJobStore::new()), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test]
async fn insert_rejects_duplicate_identifiers() -> Result<()> {
    let store = InMemoryJobStore::new();
    let job = Job::new(descriptor("calc-app", 1, "abc")?, &DefaultClock);

    store.insert(&job).await?;
    let duplicate = store.insert(&job).await;

    ensure!(matches!(duplicate, Err(JobStoreError::DuplicateJob(ref id)) if id == job.id()));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn rejected_mutation_leaves_stored_job_intact() -> Result<()> {
    let store = InMemoryJobStore::new();
    let job = Job::new(descriptor("calc-app", 1, "abc")?, &DefaultClock);
    store.insert(&job).await?;

    let result = store
        .update(job.id(), &|candidate: &mut Job| {
            candidate.mark_active(&DefaultClock)?;
            candidate.mark_active(&DefaultClock)
        })
        .await;

    ensure!(matches!(
        result,
        Err(JobStoreError::Domain(JobDomainError::InvalidStatusTransition { .. }))
    ));
    let stored = store.find_by_id(job.id()).await?;
    ensure!(stored.map(|found| found.status()) == Some(JobStatus::Waiting));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn updating_unknown_job_is_not_found() {
    let store = InMemoryJobStore::new();
    let missing = JobId::from_raw("ghost-round-1-x");

    let result = store
        .update(&missing, &|job: &mut Job| job.mark_active(&DefaultClock))
        .await;

    assert!(matches!(result, Err(JobStoreError::NotFound(ref id)) if *id == missing));
}

#[rstest]
#[tokio::test]
async fn register_twice_returns_already_known(tracker: TestTracker) -> Result<()> {
    let first = tracker.register(descriptor("calc-app", 1, "abc")?).await?;
    let second = tracker.register(descriptor("calc-app", 1, "abc")?).await?;

    ensure!(first == SubmissionOutcome::Queued(JobId::from_raw("calc-app-round-1-abc")));
    ensure!(
        second
            == SubmissionOutcome::AlreadyKnown {
                job_id: JobId::from_raw("calc-app-round-1-abc"),
                status: JobStatus::Waiting,
            }
    );
    ensure!(tracker.health_summary().await?.total() == 1);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn separator_inside_the_nonce_cannot_alias_another_task(tracker: TestTracker) -> Result<()> {
    let first = tracker.register(descriptor("a-round-1-b", 1, "c")?).await?;
    let aliasing = descriptor("a", 1, "b-round-1-c");

    ensure!(first == SubmissionOutcome::Queued(JobId::from_raw("a-round-1-b-round-1-c")));
    ensure!(aliasing == Err(JobDomainError::AmbiguousNonce("b-round-1-c".to_owned())));
    ensure!(tracker.health_summary().await?.total() == 1);
    Ok(())
}

/// Store whose every slot is already taken by `occupant`.
struct OccupiedStore {
    inner: InMemoryJobStore,
    occupant: Job,
}

impl OccupiedStore {
    async fn holding(occupant: Job) -> Result<Self> {
        let inner = InMemoryJobStore::new();
        inner.insert(&occupant).await?;
        Ok(Self { inner, occupant })
    }
}

#[async_trait]
impl JobStore for OccupiedStore {
    async fn insert(&self, job: &Job) -> JobStoreResult<()> {
        Err(JobStoreError::DuplicateJob(job.id().clone()))
    }

    async fn update(&self, id: &JobId, mutation: JobMutation<'_>) -> JobStoreResult<Job> {
        self.inner.update(id, mutation).await
    }

    async fn find_by_id(&self, _id: &JobId) -> JobStoreResult<Option<Job>> {
        Ok(Some(self.occupant.clone()))
    }

    async fn health_summary(&self) -> JobStoreResult<QueueHealth> {
        self.inner.health_summary().await
    }
}

#[rstest]
#[tokio::test]
async fn identifier_held_by_another_request_is_a_conflict() -> Result<()> {
    let occupant = Job::new(descriptor("a-round-1-b", 1, "c")?, &DefaultClock);
    let store = Arc::new(OccupiedStore::holding(occupant).await?);
    let tracker = JobTracker::new(Arc::clone(&store), Arc::new(DefaultClock));

    let same = tracker.register(descriptor("a-round-1-b", 1, "c")?).await?;
    let other = tracker.register(descriptor("calc-app", 1, "c")?).await;

    ensure!(!same.is_queued());
    ensure!(matches!(
        other,
        Err(JobStoreError::IdentityConflict(ref id)) if id.as_str() == "calc-app-round-1-c"
    ));
    ensure!(store.health_summary().await?.total() == 1);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn duplicate_does_not_touch_a_running_job(tracker: TestTracker) -> Result<()> {
    let outcome = tracker.register(descriptor("calc-app", 1, "abc")?).await?;
    let job_id = outcome.job_id().clone();
    tracker.mark_active(&job_id).await?;
    tracker
        .update(&job_id, &ProgressUpdate::new(JobStage::CommittingFiles, 50, "files"))
        .await?;

    let duplicate = tracker.register(descriptor("calc-app", 1, "abc")?).await?;

    ensure!(!duplicate.is_queued());
    let job = tracker.get(&job_id).await?;
    ensure!(job.as_ref().map(Job::status) == Some(JobStatus::Active));
    ensure!(job.as_ref().map(|found| found.progress().percent()) == Some(50));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn updates_after_completion_are_rejected(tracker: TestTracker) -> Result<()> {
    let outcome = tracker.register(descriptor("calc-app", 1, "abc")?).await?;
    let job_id = outcome.job_id().clone();
    tracker.mark_active(&job_id).await?;
    tracker.mark_completed(&job_id).await?;

    let late = tracker
        .update(&job_id, &ProgressUpdate::new(JobStage::SendingEvaluation, 90, "late"))
        .await;
    let failed_after_completion = tracker.mark_failed(&job_id, "late").await;

    ensure!(matches!(
        late,
        Err(JobStoreError::Domain(JobDomainError::ProgressRequiresActive { .. }))
    ));
    ensure!(matches!(
        failed_after_completion,
        Err(JobStoreError::Domain(JobDomainError::InvalidStatusTransition { .. }))
    ));
    let job = tracker.get(&job_id).await?;
    ensure!(job.map(|found| (found.status(), found.progress().percent())) == Some((JobStatus::Completed, 100)));
    Ok(())
}
