//! Generation request value.

use crate::job::domain::Attachment;

/// Input to the content-generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    brief: String,
    attachments: Vec<Attachment>,
    existing_content: Option<String>,
}

impl GenerationRequest {
    /// Creates a request for a fresh build.
    #[must_use]
    pub fn new(brief: impl Into<String>, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        Self {
            brief: brief.into(),
            attachments: attachments.into_iter().collect(),
            existing_content: None,
        }
    }

    /// Sets the current primary artifact to revise.
    #[must_use]
    pub fn with_existing_content(mut self, content: impl Into<String>) -> Self {
        self.existing_content = Some(content.into());
        self
    }

    /// Returns the brief.
    #[must_use]
    pub fn brief(&self) -> &str {
        &self.brief
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the content being revised, if any.
    #[must_use]
    pub fn existing_content(&self) -> Option<&str> {
        self.existing_content.as_deref()
    }

    /// Returns whether this request revises existing content.
    #[must_use]
    pub const fn is_revision(&self) -> bool {
        self.existing_content.is_some()
    }
}
