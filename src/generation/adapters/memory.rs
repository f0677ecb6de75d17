//! In-memory content generator for tests and offline runs.

use crate::generation::{
    domain::{GeneratedSite, GenerationRequest},
    ports::{ContentGenerator, GenerationError, GenerationResult},
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Content generator returning a fixed outcome and recording requests.
#[derive(Debug, Clone)]
pub struct InMemoryContentGenerator {
    outcome: Result<GeneratedSite, GenerationError>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl InMemoryContentGenerator {
    /// Creates a generator that always returns `site`.
    #[must_use]
    pub fn new(site: GeneratedSite) -> Self {
        Self::with_outcome(Ok(site))
    }

    /// Creates a generator that always fails with a service error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Err(GenerationError::Api {
            status: 503,
            body: message.into(),
        }))
    }

    fn with_outcome(outcome: Result<GeneratedSite, GenerationError>) -> Self {
        Self {
            outcome,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentGenerator for InMemoryContentGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<GeneratedSite> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.outcome.clone()
    }
}
