//! Retry policy for webhook delivery.

use std::time::Duration;

/// Capped exponential backoff bounded by an overall deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound for any single wait.
    pub max_delay: Duration,
    /// Time allowed for one delivery attempt.
    pub attempt_timeout: Duration,
    /// Total time allowed across all attempts and waits.
    pub deadline: Duration,
}

impl RetryPolicy {
    /// Returns the wait that follows `current`, doubled and capped.
    #[must_use]
    pub fn next_delay(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            attempt_timeout: Duration::from_secs(30),
            deadline: Duration::from_secs(10 * 60),
        }
    }
}
