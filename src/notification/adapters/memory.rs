//! Scripted evaluation sink for tests.

use crate::notification::{
    domain::EvaluationPayload,
    ports::{DeliveryError, EvaluationSink},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// One recorded delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    /// Target URL.
    pub url: String,
    /// Delivered payload.
    pub payload: EvaluationPayload,
    /// Per-attempt timeout that was requested.
    pub timeout: Duration,
    /// Tokio clock reading when the attempt was made.
    pub at: Instant,
}

#[derive(Debug)]
struct SinkState {
    script: VecDeque<Result<(), DeliveryError>>,
    fallback: Result<(), DeliveryError>,
    attempts: Vec<DeliveryAttempt>,
}

/// Evaluation sink that plays back scripted outcomes.
///
/// Scripted outcomes are consumed in order; once exhausted every attempt
/// returns the fallback outcome.
#[derive(Debug, Clone)]
pub struct InMemoryEvaluationSink {
    state: Arc<Mutex<SinkState>>,
}

impl InMemoryEvaluationSink {
    /// Creates a sink where every attempt succeeds.
    #[must_use]
    pub fn accepting() -> Self {
        Self::scripted(Vec::new(), Ok(()))
    }

    /// Creates a sink where every attempt fails with `error`.
    #[must_use]
    pub fn rejecting(error: DeliveryError) -> Self {
        Self::scripted(Vec::new(), Err(error))
    }

    /// Creates a sink playing `script` first, then `fallback`.
    #[must_use]
    pub fn scripted(
        script: impl IntoIterator<Item = Result<(), DeliveryError>>,
        fallback: Result<(), DeliveryError>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SinkState {
                script: script.into_iter().collect(),
                fallback,
                attempts: Vec::new(),
            })),
        }
    }

    /// Returns every attempt made so far, oldest first.
    #[must_use]
    pub fn attempts(&self) -> Vec<DeliveryAttempt> {
        self.state
            .lock()
            .map(|state| state.attempts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EvaluationSink for InMemoryEvaluationSink {
    async fn deliver(
        &self,
        url: &str,
        payload: &EvaluationPayload,
        timeout: Duration,
    ) -> Result<(), DeliveryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        state.attempts.push(DeliveryAttempt {
            url: url.to_owned(),
            payload: payload.clone(),
            timeout,
            at: Instant::now(),
        });
        let fallback = state.fallback.clone();
        state.script.pop_front().unwrap_or(fallback)
    }
}
