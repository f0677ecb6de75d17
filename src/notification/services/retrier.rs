//! Webhook delivery with capped exponential backoff.

use crate::notification::{
    domain::{EvaluationPayload, RetryPolicy},
    ports::{DeliveryError, EvaluationNotifier, EvaluationSink},
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::{Instant, sleep, timeout};
use tracing::{info, warn};

/// Retries single-attempt deliveries until one succeeds or the policy
/// deadline passes.
///
/// Timing uses Tokio's clock, so tests can pause and advance time.
pub struct NotificationRetrier<S>
where
    S: EvaluationSink,
{
    sink: Arc<S>,
    policy: RetryPolicy,
}

impl<S> Clone for NotificationRetrier<S>
where
    S: EvaluationSink,
{
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            policy: self.policy,
        }
    }
}

impl<S> NotificationRetrier<S>
where
    S: EvaluationSink,
{
    /// Creates a retrier with the default policy.
    #[must_use]
    pub fn new(sink: Arc<S>) -> Self {
        Self::with_policy(sink, RetryPolicy::default())
    }

    /// Creates a retrier with a custom policy.
    #[must_use]
    pub const fn with_policy(sink: Arc<S>, policy: RetryPolicy) -> Self {
        Self { sink, policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }

    async fn attempt(&self, url: &str, payload: &EvaluationPayload) -> Result<(), DeliveryError> {
        let limit = self.policy.attempt_timeout;
        timeout(limit, self.sink.deliver(url, payload, limit))
            .await
            .unwrap_or_else(|_| {
                Err(DeliveryError::Transport(format!(
                    "no response within {}s",
                    limit.as_secs()
                )))
            })
    }
}

#[async_trait]
impl<S> EvaluationNotifier for NotificationRetrier<S>
where
    S: EvaluationSink + 'static,
{
    async fn notify(&self, url: &str, payload: &EvaluationPayload) -> bool {
        let deadline = Instant::now() + self.policy.deadline;
        let mut delay = self.policy.initial_delay;
        let mut attempt: u32 = 0;

        while Instant::now() < deadline {
            attempt += 1;
            match self.attempt(url, payload).await {
                Ok(()) => {
                    info!(attempt, url, task = %payload.task, "notified evaluation server");
                    return true;
                }
                Err(err) => warn!(attempt, url, error = %err, "evaluation delivery failed"),
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(attempt, "notification deadline reached, stopping retries");
                break;
            }
            let wait = delay.min(remaining);
            info!(attempt, wait_ms = wait.as_millis(), "retrying evaluation delivery");
            sleep(wait).await;
            delay = self.policy.next_delay(delay);
        }

        warn!(attempts = attempt, url, "failed to notify evaluation server within deadline");
        false
    }
}
