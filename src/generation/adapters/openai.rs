//! OpenAI-compatible chat-completions adapter.

use crate::generation::{
    domain::{GeneratedSite, GenerationRequest, render_prompt},
    ports::{ContentGenerator, GenerationError, GenerationResult},
};
use async_trait::async_trait;
use mockable::Clock;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiConfig {
    /// Base URL up to and including the API version, e.g.
    /// `https://aipipe.org/openrouter/v1`.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model name sent with each request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl OpenAiConfig {
    /// Default sampling temperature.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Creates settings with the default temperature.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Content generator backed by a chat-completions endpoint.
///
/// The clock supplies the date stamped into prompts and fallback READMEs.
pub struct OpenAiContentGenerator<C>
where
    C: Clock,
{
    client: reqwest::Client,
    config: OpenAiConfig,
    clock: Arc<C>,
}

impl<C> Clone for OpenAiContentGenerator<C>
where
    C: Clock,
{
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> OpenAiContentGenerator<C>
where
    C: Clock,
{
    /// Creates a generator with a fresh HTTP client.
    #[must_use]
    pub fn new(config: OpenAiConfig, clock: Arc<C>) -> Self {
        Self::with_client(reqwest::Client::new(), config, clock)
    }

    /// Creates a generator sharing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: OpenAiConfig, clock: Arc<C>) -> Self {
        Self {
            client,
            config,
            clock,
        }
    }
}

#[async_trait]
impl<C> ContentGenerator for OpenAiContentGenerator<C>
where
    C: Clock + 'static,
{
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<GeneratedSite> {
        let today = self.clock.utc().date_naive();
        let prompt = render_prompt(request, today)?;
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.config.temperature,
        });

        debug!(model = %self.config.model, revision = request.is_revision(), "requesting completion");
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(GenerationError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(GenerationError::transport)?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyCompletion)?;

        let site = GeneratedSite::from_completion(&content, request.brief(), today);
        info!(
            content_chars = site.content().len(),
            description_chars = site.description().len(),
            "generated site"
        );
        Ok(site)
    }
}
