//! Request and response bodies.

use crate::job::domain::QueueHealth;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attachment reference as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDto {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Location of the attachment.
    #[serde(default)]
    pub url: String,
}

/// Raw submission body.
///
/// Every field is optional at the JSON level so that validation can
/// report all problems at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitTaskRequest {
    /// Submitter email.
    pub email: String,
    /// Shared secret.
    pub secret: String,
    /// Task name, used as the repository name.
    pub task: String,
    /// Round number.
    pub round: Option<u64>,
    /// Uniqueness token.
    pub nonce: String,
    /// Free-text brief.
    pub brief: String,
    /// Evaluation checks; accepted and ignored.
    pub checks: Vec<String>,
    /// Webhook notified when the build finishes.
    pub evaluation_url: Option<String>,
    /// Supplementary material.
    pub attachments: Vec<AttachmentDto>,
}

/// Body returned for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTaskResponse {
    /// Always `processing`.
    pub status: String,
    /// Identifier to poll with.
    pub task_id: String,
    /// Task name.
    pub task: String,
    /// Round number.
    pub round: u8,
    /// Human-readable summary.
    pub message: String,
}

/// Query string of the status route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskStatusQuery {
    /// Job identifier.
    #[serde(rename = "taskId")]
    pub task_id: Option<String>,
}

/// Body of the health route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy`.
    pub status: String,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
    /// Job counts per status.
    pub queue: QueueHealth,
}

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
