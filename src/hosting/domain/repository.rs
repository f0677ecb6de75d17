//! Repository handles and commit identifiers.

use std::fmt;

/// A repository owned by the configured account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedRepository {
    name: String,
    html_url: String,
}

impl HostedRepository {
    /// Creates a repository handle.
    #[must_use]
    pub fn new(name: impl Into<String>, html_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            html_url: html_url.into(),
        }
    }

    /// Returns the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the browsable repository address.
    #[must_use]
    pub fn html_url(&self) -> &str {
        &self.html_url
    }
}

/// Identifier of a commit on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    const SHORT_LEN: usize = 7;

    /// Wraps a commit identifier.
    #[must_use]
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// Returns the full identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the abbreviated identifier used in log lines.
    #[must_use]
    pub fn short(&self) -> String {
        self.0.chars().take(Self::SHORT_LEN).collect()
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of asking the host to publish a repository as a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagesActivation {
    /// Publishing was switched on by this request.
    Enabled,
    /// Publishing was already on.
    AlreadyEnabled,
}

/// Derives the public site address for a repository.
///
/// The address is deterministic and does not depend on whether
/// publishing has finished.
#[must_use]
pub fn pages_url(owner: &str, pages_domain: &str, repository: &str) -> String {
    format!("https://{owner}.{pages_domain}/{repository}/")
}
