//! Inbound HTTP surface.
//!
//! A thin `axum` layer over the job engine:
//! - `routes`: submission, status and health handlers
//! - `dto`: request and response bodies
//! - `validation`: turns a raw submission into a task descriptor
//! - `errors`: consistent JSON error responses

pub mod dto;
pub mod errors;
pub mod routes;
pub mod validation;

use crate::job::{
    ports::JobStore,
    services::{JobScheduler, StatusReporter},
};
use axum::{
    Router,
    routing::{get, post},
};
use mockable::Clock;
use std::sync::Arc;

/// Shared handler state.
pub struct AppState<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    secret: Arc<str>,
    scheduler: JobScheduler<S, C>,
    status: StatusReporter<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for AppState<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            secret: Arc::clone(&self.secret),
            scheduler: self.scheduler.clone(),
            status: self.status.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> AppState<S, C>
where
    S: JobStore,
    C: Clock + Send + Sync,
{
    /// Creates handler state.
    #[must_use]
    pub fn new(
        secret: impl Into<Arc<str>>,
        scheduler: JobScheduler<S, C>,
        status: StatusReporter<S>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            secret: secret.into(),
            scheduler,
            status,
            clock,
        }
    }
}

/// Builds the router serving every public route.
pub fn build_router<S, C>(state: AppState<S, C>) -> Router
where
    S: JobStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/api/api-endpoint", post(routes::submit_task::<S, C>))
        .route("/api/task-status", get(routes::task_status::<S, C>))
        .route("/api/health", get(routes::health::<S, C>))
        .with_state(state)
}
