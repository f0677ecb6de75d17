//! Fine-grained progress types reported by the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named pipeline step, used for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStage {
    /// Accepted and waiting for the scheduler.
    Queued,
    /// Loading the existing repository and primary artifact (round 2).
    FetchingRepo,
    /// Waiting on the content-generation service.
    GeneratingHtml,
    /// Creating or reusing the target repository (round 1).
    CreatingRepo,
    /// Writing the initial files (round 1).
    CommittingFiles,
    /// Rewriting the primary artifact and description (round 2).
    UpdatingFiles,
    /// Turning on public hosting (round 1).
    EnablingPages,
    /// Delivering the evaluation payload.
    SendingEvaluation,
    /// Finished successfully.
    Completed,
    /// Aborted with an error.
    Failed,
}

impl JobStage {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::FetchingRepo => "fetching-repo",
            Self::GeneratingHtml => "generating-html",
            Self::CreatingRepo => "creating-repo",
            Self::CommittingFiles => "committing-files",
            Self::UpdatingFiles => "updating-files",
            Self::EnablingPages => "enabling-pages",
            Self::SendingEvaluation => "sending-evaluation",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion percentage in the range `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// No progress.
    pub const ZERO: Self = Self(0);
    /// Fully complete.
    pub const COMPLETE: Self = Self(100);

    /// Creates a progress value, saturating at 100.
    #[must_use]
    pub const fn new(percent: u8) -> Self {
        if percent > 100 {
            Self::COMPLETE
        } else {
            Self(percent)
        }
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Partial update merged into an active job.
///
/// Result fields left as `None` keep whatever value the job already holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    stage: JobStage,
    progress: Progress,
    message: String,
    repository_url: Option<String>,
    pages_url: Option<String>,
    commit_sha: Option<String>,
}

impl ProgressUpdate {
    /// Creates an update for a stage with a progress milestone.
    #[must_use]
    pub fn new(stage: JobStage, percent: u8, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: Progress::new(percent),
            message: message.into(),
            repository_url: None,
            pages_url: None,
            commit_sha: None,
        }
    }

    /// Attaches the repository URL.
    #[must_use]
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Attaches the public hosting URL.
    #[must_use]
    pub fn with_pages_url(mut self, url: impl Into<String>) -> Self {
        self.pages_url = Some(url.into());
        self
    }

    /// Attaches the latest commit identifier.
    #[must_use]
    pub fn with_commit_sha(mut self, sha: impl Into<String>) -> Self {
        self.commit_sha = Some(sha.into());
        self
    }

    /// Returns the reported stage.
    #[must_use]
    pub const fn stage(&self) -> JobStage {
        self.stage
    }

    /// Returns the reported progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the step description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the repository URL, if reported.
    #[must_use]
    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    /// Returns the hosting URL, if reported.
    #[must_use]
    pub fn pages_url(&self) -> Option<&str> {
        self.pages_url.as_deref()
    }

    /// Returns the commit identifier, if reported.
    #[must_use]
    pub fn commit_sha(&self) -> Option<&str> {
        self.commit_sha.as_deref()
    }
}
