//! Turns a raw submission into a [`TaskDescriptor`].
//!
//! Every field is checked and all problems are collected, so a caller sees
//! the full list in one response. The shared secret is checked by the
//! route, not here.

use super::dto::{FieldError, SubmitTaskRequest};
use crate::job::domain::{Attachment, Nonce, Round, TaskDescriptor, TaskName};

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Validates `request` and builds the descriptor handed to the scheduler.
///
/// # Errors
///
/// Returns every [`FieldError`] found when any field is invalid.
pub fn validate_submission(request: SubmitTaskRequest) -> Result<TaskDescriptor, Vec<FieldError>> {
    let mut errors = Vec::new();

    if !request.email.contains('@') {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }
    let task = TaskName::new(request.task)
        .map_err(|err| errors.push(FieldError::new("task", err.to_string())))
        .ok();
    let round = request
        .round
        .ok_or_else(|| FieldError::new("round", "is required"))
        .and_then(|raw| {
            Round::try_from(raw).map_err(|err| FieldError::new("round", err.to_string()))
        })
        .map_err(|err| errors.push(err))
        .ok();
    let nonce = Nonce::new(request.nonce)
        .map_err(|err| errors.push(FieldError::new("nonce", err.to_string())))
        .ok();
    if request.brief.trim().is_empty() {
        errors.push(FieldError::new("brief", "must not be empty"));
    }
    if request
        .evaluation_url
        .as_deref()
        .is_some_and(|url| !is_http_url(url))
    {
        errors.push(FieldError::new("evaluation_url", "must be an http(s) URL"));
    }
    for (index, attachment) in request.attachments.iter().enumerate() {
        if attachment.name.trim().is_empty() {
            errors.push(FieldError::new(
                format!("attachments[{index}].name"),
                "must not be empty",
            ));
        }
        if !is_http_url(&attachment.url) {
            errors.push(FieldError::new(
                format!("attachments[{index}].url"),
                "must be an http(s) URL",
            ));
        }
    }

    match (task, round, nonce) {
        (Some(task), Some(round), Some(nonce)) if errors.is_empty() => {
            let attachments = request
                .attachments
                .into_iter()
                .map(|attachment| Attachment::new(attachment.name, attachment.url));
            let mut descriptor =
                TaskDescriptor::new(request.email, task, round, nonce, request.brief)
                    .with_attachments(attachments);
            if let Some(url) = request.evaluation_url {
                descriptor = descriptor.with_evaluation_url(url);
            }
            Ok(descriptor)
        }
        _ => Err(errors),
    }
}
