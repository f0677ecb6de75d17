//! Evaluation payload.

use serde::{Deserialize, Serialize};

/// Body posted to the evaluation webhook once a site is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPayload {
    /// Submitter email.
    pub email: String,
    /// Task name.
    pub task: String,
    /// Round number, 1 or 2.
    pub round: u8,
    /// Submitter nonce.
    pub nonce: String,
    /// Browsable repository address.
    pub repo_url: String,
    /// Commit identifier of the last write in the round.
    pub commit_sha: String,
    /// Public site address.
    pub pages_url: String,
}
