//! Build and revise pipelines executed for each job.
//!
//! Round 1 generates a site, creates (or reuses) its repository, commits
//! the primary artifact, license and description, enables publishing and
//! notifies the evaluation webhook. Round 2 reads the existing primary
//! artifact, regenerates it as a revision and rewrites the artifact and
//! description. Collaborator failures are never retried here; the first
//! one aborts the run. Only the final notification is retried, inside the
//! notifier, and its failure never fails the job.

use crate::generation::{
    domain::{GeneratedSite, GenerationRequest},
    ports::{ContentGenerator, GenerationError},
};
use crate::hosting::{
    domain::{
        CommitSha, HostedRepository, INDEX_PATH, LICENSE_PATH, LicenseError, PagesActivation,
        README_PATH, render_mit_license,
    },
    ports::{SourceHost, SourceHostError},
};
use crate::job::{
    domain::{JobStage, ProgressUpdate, Round, TaskDescriptor},
    ports::{JobRunError, JobRunner, StageReporter, StageReporterError},
};
use crate::notification::{domain::EvaluationPayload, ports::EvaluationNotifier};
use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

const REPOSITORY_DESCRIPTION_CHARS: usize = 100;
const REVISION_SUMMARY_CHARS: usize = 50;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Content generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// A repository operation failed.
    #[error(transparent)]
    Hosting(#[from] SourceHostError),
    /// The license document could not be rendered.
    #[error(transparent)]
    License(#[from] LicenseError),
    /// Progress could not be recorded.
    #[error(transparent)]
    Reporter(#[from] StageReporterError),
}

/// Artifacts produced by a successful round.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Publication {
    repository: HostedRepository,
    commit_sha: CommitSha,
    pages_url: String,
}

/// Job runner driving the build and revise rounds.
pub struct TaskPipeline<G, H, N, C>
where
    G: ContentGenerator,
    H: SourceHost,
    N: EvaluationNotifier,
    C: Clock + Send + Sync,
{
    generator: Arc<G>,
    host: Arc<H>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<G, H, N, C> Clone for TaskPipeline<G, H, N, C>
where
    G: ContentGenerator,
    H: SourceHost,
    N: EvaluationNotifier,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            host: Arc::clone(&self.host),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<G, H, N, C> TaskPipeline<G, H, N, C>
where
    G: ContentGenerator,
    H: SourceHost,
    N: EvaluationNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a pipeline over its collaborators.
    #[must_use]
    pub const fn new(generator: Arc<G>, host: Arc<H>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            generator,
            host,
            notifier,
            clock,
        }
    }

    /// Runs the round selected by the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] for the first collaborator failure.
    pub async fn execute(
        &self,
        descriptor: &TaskDescriptor,
        reporter: &dyn StageReporter,
    ) -> Result<(), PipelineError> {
        info!(
            task = %descriptor.task(),
            round = descriptor.round().number(),
            "pipeline started"
        );
        let publication = match descriptor.round() {
            Round::Build => self.build(descriptor, reporter).await?,
            Round::Revise => self.revise(descriptor, reporter).await?,
        };
        self.notify(descriptor, &publication, reporter).await?;
        info!(
            task = %descriptor.task(),
            round = descriptor.round().number(),
            pages_url = %publication.pages_url,
            "pipeline finished"
        );
        Ok(())
    }

    async fn build(
        &self,
        descriptor: &TaskDescriptor,
        reporter: &dyn StageReporter,
    ) -> Result<Publication, PipelineError> {
        let name = descriptor.task().as_str();

        reporter
            .report(ProgressUpdate::new(
                JobStage::GeneratingHtml,
                10,
                "Generating HTML application with LLM",
            ))
            .await?;
        let request = GenerationRequest::new(descriptor.brief(), descriptor.attachments().to_vec());
        let site = self.generator.generate(&request).await?;
        log_generated(&site);

        reporter
            .report(ProgressUpdate::new(
                JobStage::CreatingRepo,
                30,
                format!("Creating GitHub repository: {name}"),
            ))
            .await?;
        let description = format!(
            "Web application: {}...",
            truncate_chars(descriptor.brief(), REPOSITORY_DESCRIPTION_CHARS)
        );
        let repository = self.host.create_repository(name, &description).await?;
        reporter
            .report(
                ProgressUpdate::new(JobStage::CreatingRepo, 40, "Repository ready")
                    .with_repository_url(repository.html_url()),
            )
            .await?;

        reporter
            .report(ProgressUpdate::new(
                JobStage::CommittingFiles,
                50,
                "Committing files to repository",
            ))
            .await?;
        let license = render_mit_license(self.clock.utc().year(), self.host.owner())?;
        self.host
            .write_file(name, INDEX_PATH, site.content(), "Initial commit: Add index.html")
            .await?;
        self.host
            .write_file(name, LICENSE_PATH, &license, "Add MIT License")
            .await?;
        let commit_sha = self
            .host
            .write_file(name, README_PATH, site.description(), "Add comprehensive README")
            .await?;
        info!(repository = name, sha = %commit_sha.short(), "committed initial files");

        reporter
            .report(ProgressUpdate::new(
                JobStage::EnablingPages,
                70,
                "Enabling GitHub Pages",
            ))
            .await?;
        match self.host.enable_pages(name).await {
            Ok(PagesActivation::Enabled) => info!(repository = name, "pages enabled"),
            Ok(PagesActivation::AlreadyEnabled) => {
                info!(repository = name, "pages already enabled");
            }
            Err(err) => warn!(repository = name, error = %err, "could not enable pages"),
        }
        let pages_url = self.host.pages_url(name);
        reporter
            .report(
                ProgressUpdate::new(
                    JobStage::EnablingPages,
                    80,
                    format!("GitHub Pages URL: {pages_url}"),
                )
                .with_pages_url(pages_url.clone())
                .with_commit_sha(commit_sha.as_str()),
            )
            .await?;

        Ok(Publication {
            repository,
            commit_sha,
            pages_url,
        })
    }

    async fn revise(
        &self,
        descriptor: &TaskDescriptor,
        reporter: &dyn StageReporter,
    ) -> Result<Publication, PipelineError> {
        let name = descriptor.task().as_str();

        reporter
            .report(ProgressUpdate::new(
                JobStage::FetchingRepo,
                10,
                format!("Fetching repository: {name}"),
            ))
            .await?;
        let repository = self.host.get_repository(name).await?;
        reporter
            .report(
                ProgressUpdate::new(JobStage::FetchingRepo, 15, "Repository found")
                    .with_repository_url(repository.html_url()),
            )
            .await?;
        let existing = self.host.read_file(name, INDEX_PATH).await?;
        info!(repository = name, chars = existing.len(), "retrieved current index.html");

        reporter
            .report(ProgressUpdate::new(
                JobStage::GeneratingHtml,
                30,
                "Generating updated HTML with LLM",
            ))
            .await?;
        let request = GenerationRequest::new(descriptor.brief(), descriptor.attachments().to_vec())
            .with_existing_content(existing);
        let site = self.generator.generate(&request).await?;
        log_generated(&site);

        reporter
            .report(ProgressUpdate::new(
                JobStage::UpdatingFiles,
                60,
                "Updating files in repository",
            ))
            .await?;
        let message = format!(
            "Round 2: Update application - {}...",
            truncate_chars(descriptor.brief(), REVISION_SUMMARY_CHARS)
        );
        self.host
            .write_file(name, INDEX_PATH, site.content(), &message)
            .await?;
        let commit_sha = self
            .host
            .write_file(name, README_PATH, site.description(), "Update README for Round 2")
            .await?;
        info!(repository = name, sha = %commit_sha.short(), "updated files");

        let pages_url = self.host.pages_url(name);
        reporter
            .report(
                ProgressUpdate::new(JobStage::UpdatingFiles, 80, "Files updated")
                    .with_pages_url(pages_url.clone())
                    .with_commit_sha(commit_sha.as_str()),
            )
            .await?;

        Ok(Publication {
            repository,
            commit_sha,
            pages_url,
        })
    }

    async fn notify(
        &self,
        descriptor: &TaskDescriptor,
        publication: &Publication,
        reporter: &dyn StageReporter,
    ) -> Result<(), PipelineError> {
        let Some(url) = descriptor.evaluation_url() else {
            info!(task = %descriptor.task(), "no evaluation url, skipping notification");
            return Ok(());
        };

        reporter
            .report(ProgressUpdate::new(
                JobStage::SendingEvaluation,
                90,
                "Sending evaluation to server",
            ))
            .await?;
        let payload = EvaluationPayload {
            email: descriptor.email().to_owned(),
            task: descriptor.task().as_str().to_owned(),
            round: descriptor.round().into(),
            nonce: descriptor.nonce().as_str().to_owned(),
            repo_url: publication.repository.html_url().to_owned(),
            commit_sha: publication.commit_sha.as_str().to_owned(),
            pages_url: publication.pages_url.clone(),
        };
        if !self.notifier.notify(url, &payload).await {
            warn!(task = %descriptor.task(), url, "evaluation server was not notified");
        }
        Ok(())
    }
}

#[async_trait]
impl<G, H, N, C> JobRunner for TaskPipeline<G, H, N, C>
where
    G: ContentGenerator + 'static,
    H: SourceHost + 'static,
    N: EvaluationNotifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    async fn run(
        &self,
        descriptor: &TaskDescriptor,
        reporter: &dyn StageReporter,
    ) -> Result<(), JobRunError> {
        self.execute(descriptor, reporter)
            .await
            .map_err(JobRunError::new)
    }
}

fn log_generated(site: &GeneratedSite) {
    info!(
        content_chars = site.content().len(),
        description_chars = site.description().len(),
        "content generated"
    );
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
