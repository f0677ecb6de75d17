//! In-memory source host for tests and offline runs.

use crate::hosting::{
    domain::{CommitSha, HostedRepository, PagesActivation, pages_url},
    ports::{SourceHost, SourceHostError, SourceHostResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One recorded file commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Repository the commit landed in.
    pub repository: String,
    /// Path that was written.
    pub path: String,
    /// Commit message actually used.
    pub message: String,
    /// Resulting commit identifier.
    pub sha: CommitSha,
}

#[derive(Debug, Default)]
struct MemoryRepository {
    html_url: String,
    files: HashMap<String, String>,
    pages_enabled: bool,
}

#[derive(Debug, Default)]
struct HostState {
    repositories: HashMap<String, MemoryRepository>,
    commits: Vec<CommitRecord>,
    pages_failure: Option<SourceHostError>,
    write_failure: Option<SourceHostError>,
}

/// Thread-safe in-memory source host.
///
/// Mirrors the behaviour of the REST adapter: creating an existing
/// repository returns it, overwriting a file uses an `Update {path}`
/// message, and enabling publishing twice reports it as already enabled.
#[derive(Debug, Clone)]
pub struct InMemorySourceHost {
    owner: String,
    pages_domain: String,
    state: Arc<Mutex<HostState>>,
}

impl InMemorySourceHost {
    /// Creates an empty host for `owner`, publishing under `github.io`.
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            pages_domain: "github.io".to_owned(),
            state: Arc::new(Mutex::new(HostState::default())),
        }
    }

    /// Overrides the publishing domain.
    #[must_use]
    pub fn with_pages_domain(mut self, domain: impl Into<String>) -> Self {
        self.pages_domain = domain.into();
        self
    }

    /// Adds a repository holding `files`.
    pub fn seed_repository<'a>(
        &self,
        name: &str,
        files: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> SourceHostResult<()> {
        let html_url = self.html_url(name);
        let mut state = self.lock()?;
        let repository = state
            .repositories
            .entry(name.to_owned())
            .or_insert_with(|| MemoryRepository {
                html_url,
                ..MemoryRepository::default()
            });
        for (path, content) in files {
            repository.files.insert(path.to_owned(), content.to_owned());
        }
        Ok(())
    }

    /// Makes every subsequent publishing request fail with `error`.
    pub fn fail_pages_with(&self, error: SourceHostError) -> SourceHostResult<()> {
        self.lock()?.pages_failure = Some(error);
        Ok(())
    }

    /// Makes every subsequent file write fail with `error`.
    pub fn fail_writes_with(&self, error: SourceHostError) -> SourceHostResult<()> {
        self.lock()?.write_failure = Some(error);
        Ok(())
    }

    /// Returns every commit made so far, oldest first.
    pub fn commits(&self) -> SourceHostResult<Vec<CommitRecord>> {
        Ok(self.lock()?.commits.clone())
    }

    /// Returns the current content of a file, if present.
    pub fn file(&self, repository: &str, path: &str) -> SourceHostResult<Option<String>> {
        Ok(self
            .lock()?
            .repositories
            .get(repository)
            .and_then(|repo| repo.files.get(path).cloned()))
    }

    /// Returns whether publishing has been enabled for a repository.
    pub fn pages_enabled(&self, repository: &str) -> SourceHostResult<bool> {
        Ok(self
            .lock()?
            .repositories
            .get(repository)
            .is_some_and(|repo| repo.pages_enabled))
    }

    fn html_url(&self, name: &str) -> String {
        format!("https://github.com/{}/{name}", self.owner)
    }

    fn lock(&self) -> SourceHostResult<MutexGuard<'_, HostState>> {
        self.state
            .lock()
            .map_err(|err| SourceHostError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl SourceHost for InMemorySourceHost {
    fn owner(&self) -> &str {
        &self.owner
    }

    async fn create_repository(
        &self,
        name: &str,
        _description: &str,
    ) -> SourceHostResult<HostedRepository> {
        let html_url = self.html_url(name);
        let mut state = self.lock()?;
        let repository = state
            .repositories
            .entry(name.to_owned())
            .or_insert_with(|| MemoryRepository {
                html_url,
                ..MemoryRepository::default()
            });
        Ok(HostedRepository::new(name, repository.html_url.clone()))
    }

    async fn get_repository(&self, name: &str) -> SourceHostResult<HostedRepository> {
        let state = self.lock()?;
        state
            .repositories
            .get(name)
            .map(|repo| HostedRepository::new(name, repo.html_url.clone()))
            .ok_or_else(|| SourceHostError::RepositoryNotFound(name.to_owned()))
    }

    async fn read_file(&self, repository: &str, path: &str) -> SourceHostResult<String> {
        let state = self.lock()?;
        let repo = state
            .repositories
            .get(repository)
            .ok_or_else(|| SourceHostError::RepositoryNotFound(repository.to_owned()))?;
        repo.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceHostError::FileNotFound {
                repository: repository.to_owned(),
                path: path.to_owned(),
            })
    }

    async fn write_file(
        &self,
        repository: &str,
        path: &str,
        content: &str,
        message: &str,
    ) -> SourceHostResult<CommitSha> {
        let mut state = self.lock()?;
        if let Some(error) = state.write_failure.clone() {
            return Err(error);
        }
        let sequence = state.commits.len() + 1;
        let repo = state
            .repositories
            .get_mut(repository)
            .ok_or_else(|| SourceHostError::RepositoryNotFound(repository.to_owned()))?;
        let message = if repo.files.contains_key(path) {
            format!("Update {path}")
        } else {
            message.to_owned()
        };
        repo.files.insert(path.to_owned(), content.to_owned());

        let sha = CommitSha::new(format!("{sequence:040x}"));
        state.commits.push(CommitRecord {
            repository: repository.to_owned(),
            path: path.to_owned(),
            message,
            sha: sha.clone(),
        });
        Ok(sha)
    }

    async fn enable_pages(&self, repository: &str) -> SourceHostResult<PagesActivation> {
        let mut state = self.lock()?;
        if let Some(error) = state.pages_failure.clone() {
            return Err(error);
        }
        let repo = state
            .repositories
            .get_mut(repository)
            .ok_or_else(|| SourceHostError::RepositoryNotFound(repository.to_owned()))?;
        if repo.pages_enabled {
            return Ok(PagesActivation::AlreadyEnabled);
        }
        repo.pages_enabled = true;
        Ok(PagesActivation::Enabled)
    }

    fn pages_url(&self, repository: &str) -> String {
        pages_url(&self.owner, &self.pages_domain, repository)
    }
}
