//! Single-attempt webhook delivery port.

use crate::notification::domain::EvaluationPayload;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Delivers a payload to a webhook exactly once.
#[async_trait]
pub trait EvaluationSink: Send + Sync {
    /// Posts `payload` to `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when the webhook cannot be reached or
    /// answers with a non-success status.
    async fn deliver(
        &self,
        url: &str,
        payload: &EvaluationPayload,
        timeout: Duration,
    ) -> Result<(), DeliveryError>;
}

/// Failure of one delivery attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The webhook answered with a non-success status.
    #[error("evaluation server returned {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The webhook could not be reached or timed out.
    #[error("error sending evaluation: {0}")]
    Transport(String),
}
