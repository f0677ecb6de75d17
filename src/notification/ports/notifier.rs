//! Notification port consumed by the task pipeline.

use crate::notification::domain::EvaluationPayload;
use async_trait::async_trait;

/// Reports a finished build to an evaluation webhook.
///
/// Implementations absorb delivery failures; the return value only says
/// whether any attempt succeeded.
#[async_trait]
pub trait EvaluationNotifier: Send + Sync {
    /// Delivers `payload` to `url`, returning `true` on success.
    async fn notify(&self, url: &str, payload: &EvaluationPayload) -> bool;
}
