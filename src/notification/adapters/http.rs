//! HTTP adapter for the evaluation sink port.

use crate::notification::{
    domain::EvaluationPayload,
    ports::{DeliveryError, EvaluationSink},
};
use async_trait::async_trait;
use std::time::Duration;

/// Posts evaluation payloads as JSON.
#[derive(Debug, Clone, Default)]
pub struct HttpEvaluationSink {
    client: reqwest::Client,
}

impl HttpEvaluationSink {
    /// Creates a sink with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink sharing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EvaluationSink for HttpEvaluationSink {
    async fn deliver(
        &self,
        url: &str,
        payload: &EvaluationPayload,
        timeout: Duration,
    ) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
