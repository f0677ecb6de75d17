//! Immutable task descriptor handed to the job engine.

use super::{JobId, Nonce, Round, TaskName};
use serde::{Deserialize, Serialize};

/// Named reference to supplementary material for the brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Display name of the attachment.
    pub name: String,
    /// Location the attachment can be fetched from.
    pub url: String,
}

impl Attachment {
    /// Creates an attachment reference.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Validated, authenticated request to build or revise a site.
///
/// The submission secret is consumed by the inbound validator and never
/// reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    email: String,
    task: TaskName,
    round: Round,
    nonce: Nonce,
    brief: String,
    evaluation_url: Option<String>,
    attachments: Vec<Attachment>,
}

impl TaskDescriptor {
    /// Creates a descriptor with required fields.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        task: TaskName,
        round: Round,
        nonce: Nonce,
        brief: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            task,
            round,
            nonce,
            brief: brief.into(),
            evaluation_url: None,
            attachments: Vec::new(),
        }
    }

    /// Sets the evaluation webhook URL.
    #[must_use]
    pub fn with_evaluation_url(mut self, url: impl Into<String>) -> Self {
        self.evaluation_url = Some(url.into());
        self
    }

    /// Sets the attachment list.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Returns the deterministic job identifier for this descriptor.
    #[must_use]
    pub fn job_id(&self) -> JobId {
        JobId::derive(&self.task, self.round, &self.nonce)
    }

    /// Returns the submitter email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the task name.
    #[must_use]
    pub const fn task(&self) -> &TaskName {
        &self.task
    }

    /// Returns the round.
    #[must_use]
    pub const fn round(&self) -> Round {
        self.round
    }

    /// Returns the nonce.
    #[must_use]
    pub const fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Returns the free-text brief.
    #[must_use]
    pub fn brief(&self) -> &str {
        &self.brief
    }

    /// Returns the evaluation webhook URL, if any.
    #[must_use]
    pub fn evaluation_url(&self) -> Option<&str> {
        self.evaluation_url.as_deref()
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}
