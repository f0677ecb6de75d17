//! Black-box tests for webhook delivery against an in-process endpoint.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use eyre::{Result, ensure};
use pagewright::notification::{
    adapters::HttpEvaluationSink,
    domain::{EvaluationPayload, RetryPolicy},
    ports::{DeliveryError, EvaluationNotifier, EvaluationSink},
    services::NotificationRetrier,
};
use rstest::{fixture, rstest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Default)]
struct Webhook {
    responses: VecDeque<u16>,
    received: Vec<EvaluationPayload>,
    delay: Duration,
}

type Shared = Arc<Mutex<Webhook>>;

async fn receive(
    State(state): State<Shared>,
    Json(payload): Json<EvaluationPayload>,
) -> (StatusCode, String) {
    let (status, delay) = {
        let mut webhook = state.lock().expect("webhook lock");
        webhook.received.push(payload);
        (webhook.responses.pop_front().unwrap_or(200), webhook.delay)
    };
    tokio::time::sleep(delay).await;
    let status = StatusCode::from_u16(status).expect("valid status code");
    (status, format!("answered {}", status.as_u16()))
}

struct Endpoint {
    url: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl Drop for Endpoint {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn endpoint(responses: &[u16], delay: Duration) -> Result<Endpoint> {
    let state = Shared::new(Mutex::new(Webhook {
        responses: responses.iter().copied().collect(),
        received: Vec::new(),
        delay,
    }));
    let router = Router::new()
        .route("/notify", post(receive))
        .with_state(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            tracing::error!(error = %err, "webhook endpoint stopped");
        }
    });
    Ok(Endpoint {
        url: format!("http://{address}/notify"),
        state,
        handle,
    })
}

#[fixture]
fn payload() -> EvaluationPayload {
    EvaluationPayload {
        email: "dev@example.com".to_owned(),
        task: "calc-app".to_owned(),
        round: 1,
        nonce: "abc".to_owned(),
        repo_url: "https://github.com/octo/calc-app".to_owned(),
        commit_sha: "0123456789abcdef".to_owned(),
        pages_url: "https://octo.github.io/calc-app/".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn success_status_delivers_the_payload(payload: EvaluationPayload) -> Result<()> {
    let webhook = endpoint(&[200], Duration::ZERO).await?;

    HttpEvaluationSink::new()
        .deliver(&webhook.url, &payload, Duration::from_secs(5))
        .await?;

    let received = webhook.state.lock().expect("webhook lock").received.clone();
    ensure!(received == [payload]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn error_status_is_rejected_with_body(payload: EvaluationPayload) -> Result<()> {
    let webhook = endpoint(&[500], Duration::ZERO).await?;

    let result = HttpEvaluationSink::new()
        .deliver(&webhook.url, &payload, Duration::from_secs(5))
        .await;

    ensure!(
        result
            == Err(DeliveryError::Rejected {
                status: 500,
                body: "answered 500".to_owned(),
            })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn slow_endpoint_times_out_as_transport_error(payload: EvaluationPayload) -> Result<()> {
    let webhook = endpoint(&[200], Duration::from_secs(2)).await?;

    let result = HttpEvaluationSink::new()
        .deliver(&webhook.url, &payload, Duration::from_millis(100))
        .await;

    ensure!(matches!(result, Err(DeliveryError::Transport(_))), "got {result:?}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn retrier_keeps_posting_until_accepted(payload: EvaluationPayload) -> Result<()> {
    let webhook = endpoint(&[503, 503, 200], Duration::ZERO).await?;
    let policy = RetryPolicy {
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(40),
        attempt_timeout: Duration::from_secs(2),
        deadline: Duration::from_secs(10),
    };
    let retrier = NotificationRetrier::with_policy(Arc::new(HttpEvaluationSink::new()), policy);

    let delivered = retrier.notify(&webhook.url, &payload).await;

    ensure!(delivered);
    ensure!(webhook.state.lock().expect("webhook lock").received.len() == 3);
    Ok(())
}
