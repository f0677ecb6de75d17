//! Source-repository hosting port.

use crate::hosting::domain::{CommitSha, HostedRepository, PagesActivation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for source-host operations.
pub type SourceHostResult<T> = Result<T, SourceHostError>;

/// Repository hosting service scoped to a single owner account.
///
/// All file operations target the default branch.
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Returns the owner account login.
    fn owner(&self) -> &str;

    /// Creates a public repository, returning the existing one when the
    /// name is already taken by the owner.
    async fn create_repository(
        &self,
        name: &str,
        description: &str,
    ) -> SourceHostResult<HostedRepository>;

    /// Looks up an existing repository.
    ///
    /// # Errors
    ///
    /// Returns [`SourceHostError::RepositoryNotFound`] when it does not
    /// exist.
    async fn get_repository(&self, name: &str) -> SourceHostResult<HostedRepository>;

    /// Reads a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceHostError::FileNotFound`] when the path is absent.
    async fn read_file(&self, repository: &str, path: &str) -> SourceHostResult<String>;

    /// Creates or replaces a file, returning the resulting commit.
    async fn write_file(
        &self,
        repository: &str,
        path: &str,
        content: &str,
        message: &str,
    ) -> SourceHostResult<CommitSha>;

    /// Turns on static-site publishing from the default branch root.
    async fn enable_pages(&self, repository: &str) -> SourceHostResult<PagesActivation>;

    /// Returns the public site address for a repository.
    fn pages_url(&self, repository: &str) -> String;
}

/// Errors returned by source-host adapters.
#[derive(Debug, Clone, Error)]
pub enum SourceHostError {
    /// The repository does not exist.
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    /// The file does not exist in the repository.
    #[error("file not found: {path} in {repository}")]
    FileNotFound {
        /// Repository name.
        repository: String,
        /// File path within the repository.
        path: String,
    },

    /// The service rejected the request.
    #[error("hosting service returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the service.
        message: String,
    },

    /// The service could not be reached.
    #[error("hosting request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with a payload that could not be understood.
    #[error("unexpected hosting response: {0}")]
    InvalidResponse(String),
}

impl SourceHostError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
