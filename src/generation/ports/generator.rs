//! Content generation port.

use crate::generation::domain::{GeneratedSite, GenerationRequest, PromptError};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for content generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Maps a brief, and optionally prior content, to generated artifacts.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates the primary content and its description document.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the service cannot produce output.
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<GeneratedSite>;
}

/// Errors returned by content generation adapters.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The prompt could not be built.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The service could not be reached or its response could not be read.
    #[error("content generation request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with a non-success status.
    #[error("content generation service returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The service answered without any content.
    #[error("content generation service returned an empty completion")]
    EmptyCompletion,
}

impl GenerationError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
