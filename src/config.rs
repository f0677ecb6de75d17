//! Environment-driven configuration.
//!
//! Required variables carry credentials; everything else falls back to a
//! default. Reading goes through a lookup function so tests never touch
//! the process environment.

use crate::generation::adapters::OpenAiConfig;
use crate::hosting::adapters::GitHubConfig;
use std::net::SocketAddr;
use thiserror::Error;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://aipipe.org/openrouter/v1";
/// Default model name.
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-4o-mini";
/// Default GitHub API root.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Default publishing domain.
pub const DEFAULT_PAGES_DOMAIN: &str = "github.io";
/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// The listen address could not be parsed.
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Shared secret submitters must present.
    pub secret: String,
    /// Language-model endpoint settings.
    pub llm: OpenAiConfig,
    /// GitHub settings.
    pub github: GitHubConfig,
    /// Listen address for the HTTP surface.
    pub bind_address: SocketAddr,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let secret = required("MY_SECRET")?;
        let llm = OpenAiConfig::new(
            optional("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            required("AIPIPE_TOKEN")?,
            optional("LLM_MODEL", DEFAULT_LLM_MODEL),
        );
        let github = GitHubConfig {
            api_url: optional("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            token: required("GITHUB_TOKEN")?,
            owner: required("GITHUB_USERNAME")?,
            pages_domain: optional("PAGES_DOMAIN", DEFAULT_PAGES_DOMAIN),
        };
        let raw_address = optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS);
        let bind_address = raw_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(raw_address.clone()))?;

        Ok(Self {
            secret,
            llm,
            github,
            bind_address,
        })
    }
}
