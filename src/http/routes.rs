//! Route handlers.

use super::{
    AppState,
    dto::{HealthResponse, SubmitTaskRequest, SubmitTaskResponse, TaskStatusQuery},
    errors::{json_error, validation_error},
    validation::validate_submission,
};
use crate::job::{
    domain::JobId,
    ports::{JobStore, JobStoreError},
    services::{SchedulerError, StatusQueryError, SubmissionOutcome},
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mockable::Clock;
use serde_json::json;
use tracing::{error, info, warn};

/// `POST /api/api-endpoint`: authenticates, validates and queues a task.
pub async fn submit_task<S, C>(
    State(state): State<AppState<S, C>>,
    payload: Result<Json<SubmitTaskRequest>, JsonRejection>,
) -> Response
where
    S: JobStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            warn!(error = %rejection, "malformed submission body");
            return json_error(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };
    if request.secret != *state.secret {
        warn!(task = %request.task, "submission with invalid secret");
        return json_error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let descriptor = match validate_submission(request) {
        Ok(descriptor) => descriptor,
        Err(details) => {
            info!(problems = details.len(), "submission failed validation");
            return validation_error(&details);
        }
    };

    let task = descriptor.task().to_string();
    let round = descriptor.round().number();
    match state.scheduler.submit(descriptor).await {
        Ok(outcome) => {
            let message = match &outcome {
                SubmissionOutcome::Queued(_) => {
                    format!("Task '{task}' (Round {round}) accepted and processing in background")
                }
                SubmissionOutcome::AlreadyKnown { status, .. } => {
                    format!("Task '{task}' (Round {round}) already submitted; current status {status}")
                }
            };
            Json(SubmitTaskResponse {
                status: "processing".to_owned(),
                task_id: outcome.job_id().to_string(),
                task,
                round,
                message,
            })
            .into_response()
        }
        Err(SchedulerError::Store(JobStoreError::IdentityConflict(job_id))) => {
            warn!(task = %task, round, job_id = %job_id, "identifier held by another request");
            json_error(
                StatusCode::CONFLICT,
                format!("Task identifier {job_id} already belongs to a different request"),
            )
        }
        Err(err) => {
            error!(task = %task, round, error = %err, "submission could not be queued");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "message": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// `GET /api/task-status?taskId=…`: returns one job's snapshot.
pub async fn task_status<S, C>(
    State(state): State<AppState<S, C>>,
    Query(query): Query<TaskStatusQuery>,
) -> Response
where
    S: JobStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Some(task_id) = query.task_id.filter(|id| !id.trim().is_empty()) else {
        return json_error(StatusCode::BAD_REQUEST, "taskId parameter is required");
    };

    match state.status.job_status(&JobId::from_raw(task_id)).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(StatusQueryError::NotFound(_)) => json_error(StatusCode::NOT_FOUND, "Task not found"),
        Err(err) => {
            error!(error = %err, "status lookup failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// `GET /api/health`: reports job counts per status.
pub async fn health<S, C>(State(state): State<AppState<S, C>>) -> Response
where
    S: JobStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    match state.status.queue_health().await {
        Ok(queue) => Json(HealthResponse {
            status: "healthy".to_owned(),
            timestamp: state.clock.utc(),
            queue,
        })
        .into_response(),
        Err(err) => {
            error!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "error": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}
