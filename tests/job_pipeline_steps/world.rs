//! Shared world state for job pipeline BDD scenarios.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use pagewright::generation::{adapters::InMemoryContentGenerator, domain::GeneratedSite};
use pagewright::hosting::adapters::InMemorySourceHost;
use pagewright::job::{
    adapters::memory::InMemoryJobStore,
    domain::{Job, JobId},
    ports::JobStore,
    services::{JobScheduler, JobTracker, SubmissionOutcome, TaskPipeline},
};
use pagewright::notification::{
    adapters::InMemoryEvaluationSink, domain::RetryPolicy, services::NotificationRetrier,
};
use rstest::fixture;

/// Scheduler type used by the BDD world.
pub type TestScheduler = JobScheduler<InMemoryJobStore, DefaultClock>;

/// Webhook every scenario submission reports to.
pub const EVALUATION_URL: &str = "https://eval.example.test/notify";

/// Scenario world for job pipeline behaviour tests.
pub struct PipelineWorld {
    pub store: Arc<InMemoryJobStore>,
    pub host: Option<Arc<InMemorySourceHost>>,
    pub sink: Arc<InMemoryEvaluationSink>,
    pub scheduler: Option<TestScheduler>,
    pub outcomes: Vec<SubmissionOutcome>,
    pub last_job: Option<Job>,
}

impl PipelineWorld {
    /// Creates a world with no scheduler running yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryJobStore::new()),
            host: None,
            sink: Arc::new(InMemoryEvaluationSink::accepting()),
            scheduler: None,
            outcomes: Vec::new(),
            last_job: None,
        }
    }

    /// Starts the scheduler over in-memory collaborators.
    pub fn start(&mut self, owner: &str) {
        let clock = Arc::new(DefaultClock);
        let host = Arc::new(InMemorySourceHost::new(owner));
        let policy = RetryPolicy {
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(10),
            attempt_timeout: Duration::from_millis(50),
            deadline: Duration::from_millis(100),
        };
        let pipeline = TaskPipeline::new(
            Arc::new(InMemoryContentGenerator::new(GeneratedSite::new(
                "<html>calc</html>",
                "# Calc",
            ))),
            Arc::clone(&host),
            Arc::new(NotificationRetrier::with_policy(Arc::clone(&self.sink), policy)),
            Arc::clone(&clock),
        );
        let tracker = JobTracker::new(Arc::clone(&self.store), clock);
        let (scheduler, _driver) = JobScheduler::start(tracker, Arc::new(pipeline));
        self.host = Some(host);
        self.scheduler = Some(scheduler);
    }

    /// Polls the store until `job_id` reaches a terminal status.
    pub async fn wait_for_terminal(&self, job_id: &JobId) -> Result<Job, eyre::Report> {
        for _ in 0..500 {
            if let Some(job) = self.store.find_by_id(job_id).await? {
                if job.status().is_terminal() {
                    return Ok(job);
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        Err(eyre::eyre!("job {job_id} did not finish in time"))
    }
}

impl Default for PipelineWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PipelineWorld {
    PipelineWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
