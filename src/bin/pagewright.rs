//! Serves the Pagewright HTTP surface.
//!
//! Configuration is read from the environment (see
//! [`pagewright::config::AppConfig`]). The process runs one scheduler
//! shared by every request handler and stops on Ctrl-C.

use mockable::DefaultClock;
use pagewright::config::{AppConfig, ConfigError};
use pagewright::generation::adapters::OpenAiContentGenerator;
use pagewright::hosting::adapters::GitHubSourceHost;
use pagewright::http::{AppState, build_router};
use pagewright::job::{
    adapters::memory::InMemoryJobStore,
    services::{JobScheduler, JobTracker, StatusReporter, TaskPipeline},
};
use pagewright::notification::{adapters::HttpEvaluationSink, services::NotificationRetrier};
use pagewright::telemetry;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that stop the server.
#[derive(Debug, Error)]
enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("server i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutdown requested");
}

async fn serve(config: AppConfig) -> Result<(), ServeError> {
    let clock = Arc::new(DefaultClock);
    let store = Arc::new(InMemoryJobStore::new());
    let tracker = JobTracker::new(Arc::clone(&store), Arc::clone(&clock));

    let pipeline = TaskPipeline::new(
        Arc::new(OpenAiContentGenerator::new(config.llm, Arc::clone(&clock))),
        Arc::new(GitHubSourceHost::new(config.github)),
        Arc::new(NotificationRetrier::new(Arc::new(HttpEvaluationSink::new()))),
        Arc::clone(&clock),
    );
    let (scheduler, driver) = JobScheduler::start(tracker, Arc::new(pipeline));
    let state = AppState::new(config.secret, scheduler, StatusReporter::new(store), clock);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!(address = %config.bind_address, "listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    driver.abort();
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    telemetry::init();

    let result = match AppConfig::from_env() {
        Ok(config) => serve(config).await,
        Err(err) => Err(err.into()),
    };
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "pagewright stopped");
            std::process::ExitCode::FAILURE
        }
    }
}
