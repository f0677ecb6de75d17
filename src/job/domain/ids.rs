//! Identifier and validated scalar types for the job domain.

use super::JobDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic job identifier derived from `(task, round, nonce)`.
///
/// Resubmitting the same logical request with the same nonce always maps
/// to the same identifier. Nonces never contain `round-`, so the last
/// `-round-` in an identifier is always the separator and distinct triples
/// never share an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Derives the identifier for a task, round, and nonce.
    #[must_use]
    pub fn derive(task: &TaskName, round: Round, nonce: &Nonce) -> Self {
        Self(format!("{task}-round-{}-{nonce}", round.number()))
    }

    /// Wraps a raw identifier received from an external caller.
    ///
    /// No validation is applied: unknown identifiers simply resolve to
    /// "not found" on lookup.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task name, doubling as the target repository name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskName(String);

impl TaskName {
    /// Longest name GitHub accepts for a repository.
    pub const MAX_LEN: usize = 100;

    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::EmptyTaskName`] when the value is blank,
    /// [`JobDomainError::TaskNameTooLong`] past
    /// [`TaskName::MAX_LEN`] characters, and
    /// [`JobDomainError::InvalidTaskName`] when it contains characters a
    /// repository name cannot carry or is `.` or `..`.
    pub fn new(value: impl Into<String>) -> Result<Self, JobDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(JobDomainError::EmptyTaskName);
        }
        let length = normalized.chars().count();
        if length > Self::MAX_LEN {
            return Err(JobDomainError::TaskNameTooLong(length));
        }
        if matches!(normalized, "." | "..") {
            return Err(JobDomainError::InvalidTaskName(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        if !is_valid {
            return Err(JobDomainError::InvalidTaskName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the task name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskName {
    type Error = JobDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskName> for String {
    fn from(value: TaskName) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied uniqueness token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nonce(String);

impl Nonce {
    /// Creates a validated nonce.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::EmptyNonce`] when the value is blank and
    /// [`JobDomainError::AmbiguousNonce`] when it contains `round-`.
    pub fn new(value: impl Into<String>) -> Result<Self, JobDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(JobDomainError::EmptyNonce);
        }
        if normalized.contains("round-") {
            return Err(JobDomainError::AmbiguousNonce(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the nonce as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nonce {
    type Error = JobDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Nonce> for String {
    fn from(value: Nonce) -> Self {
        value.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pipeline round: the initial build or a revision of prior output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u8")]
pub enum Round {
    /// Round 1: generate, create the repository, publish.
    Build,
    /// Round 2: revise the published content in place.
    Revise,
}

impl Round {
    /// Returns the wire number of the round.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Build => 1,
            Self::Revise => 2,
        }
    }
}

impl TryFrom<u64> for Round {
    type Error = JobDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Build),
            2 => Ok(Self::Revise),
            other => Err(JobDomainError::InvalidRound(other)),
        }
    }
}

impl From<Round> for u8 {
    fn from(value: Round) -> Self {
        value.number()
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
