//! GitHub REST adapter for the source-host port.

use crate::hosting::{
    domain::{CommitSha, DEFAULT_BRANCH, HostedRepository, PagesActivation, pages_url},
    ports::{SourceHost, SourceHostError, SourceHostResult},
};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("pagewright/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the GitHub REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// API root, e.g. `https://api.github.com`.
    pub api_url: String,
    /// Personal access token.
    pub token: String,
    /// Login of the account owning created repositories.
    pub owner: String,
    /// Domain published sites are served from, e.g. `github.io`.
    pub pages_domain: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    name: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct WriteRequest {
    message: String,
    content: String,
    branch: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    commit: CommitResponse,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: String,
}

/// Source host backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubSourceHost {
    client: reqwest::Client,
    config: GitHubConfig,
}

impl GitHubSourceHost {
    /// Creates an adapter with a fresh HTTP client.
    #[must_use]
    pub fn new(config: GitHubConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates an adapter sharing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: GitHubConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url.trim_end_matches('/'))
    }

    fn repository_path(&self, repository: &str) -> String {
        format!("/repos/{}/{repository}", self.config.owner)
    }

    fn authorised(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send(&self, builder: RequestBuilder) -> SourceHostResult<Response> {
        self.authorised(builder)
            .send()
            .await
            .map_err(SourceHostError::transport)
    }

    /// Reads the blob sha and decoded text of a file.
    async fn fetch_content(
        &self,
        repository: &str,
        path: &str,
    ) -> SourceHostResult<(String, Option<String>)> {
        let url = self.url(&format!("{}/contents/{path}", self.repository_path(repository)));
        let response = self
            .send(self.client.get(url).query(&[("ref", DEFAULT_BRANCH)]))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SourceHostError::FileNotFound {
                repository: repository.to_owned(),
                path: path.to_owned(),
            });
        }
        let body: ContentResponse = parse_success(response).await?;
        let text = body.content.map(|encoded| decode_content(&encoded)).transpose()?;
        Ok((body.sha, text))
    }
}

#[async_trait]
impl SourceHost for GitHubSourceHost {
    fn owner(&self) -> &str {
        &self.config.owner
    }

    async fn create_repository(
        &self,
        name: &str,
        description: &str,
    ) -> SourceHostResult<HostedRepository> {
        let body = json!({
            "name": name,
            "description": description,
            "private": false,
            "auto_init": false,
        });
        let response = self
            .send(self.client.post(self.url("/user/repos")).json(&body))
            .await?;
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            info!(repository = name, "repository already exists, fetching it");
            return self.get_repository(name).await;
        }
        let created: RepositoryResponse = parse_success(response).await?;
        info!(repository = %created.name, url = %created.html_url, "created repository");
        Ok(HostedRepository::new(created.name, created.html_url))
    }

    async fn get_repository(&self, name: &str) -> SourceHostResult<HostedRepository> {
        let response = self
            .send(self.client.get(self.url(&self.repository_path(name))))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SourceHostError::RepositoryNotFound(name.to_owned()));
        }
        let found: RepositoryResponse = parse_success(response).await?;
        Ok(HostedRepository::new(found.name, found.html_url))
    }

    async fn read_file(&self, repository: &str, path: &str) -> SourceHostResult<String> {
        let (_, text) = self.fetch_content(repository, path).await?;
        text.ok_or_else(|| SourceHostError::FileNotFound {
            repository: repository.to_owned(),
            path: path.to_owned(),
        })
    }

    async fn write_file(
        &self,
        repository: &str,
        path: &str,
        content: &str,
        message: &str,
    ) -> SourceHostResult<CommitSha> {
        let existing_sha = match self.fetch_content(repository, path).await {
            Ok((sha, _)) => Some(sha),
            Err(SourceHostError::FileNotFound { .. }) => None,
            Err(err) => return Err(err),
        };
        let commit_message = existing_sha
            .as_ref()
            .map_or_else(|| message.to_owned(), |_| format!("Update {path}"));

        let body = WriteRequest {
            message: commit_message,
            content: STANDARD.encode(content),
            branch: DEFAULT_BRANCH,
            sha: existing_sha,
        };

        let url = self.url(&format!("{}/contents/{path}", self.repository_path(repository)));
        let response = self.send(self.client.put(url).json(&body)).await?;
        let written: WriteResponse = parse_success(response).await?;
        let sha = CommitSha::new(written.commit.sha);
        debug!(repository, path, sha = %sha.short(), "committed file");
        Ok(sha)
    }

    async fn enable_pages(&self, repository: &str) -> SourceHostResult<PagesActivation> {
        let body = json!({ "source": { "branch": DEFAULT_BRANCH, "path": "/" } });
        let url = self.url(&format!("{}/pages", self.repository_path(repository)));
        let response = self.send(self.client.post(url).json(&body)).await?;
        match response.status() {
            StatusCode::CONFLICT => Ok(PagesActivation::AlreadyEnabled),
            status if status.is_success() => Ok(PagesActivation::Enabled),
            _ => Err(api_error(response).await),
        }
    }

    fn pages_url(&self, repository: &str) -> String {
        pages_url(&self.config.owner, &self.config.pages_domain, repository)
    }
}

async fn parse_success<T: DeserializeOwned>(response: Response) -> SourceHostResult<T> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    response
        .json()
        .await
        .map_err(|err| SourceHostError::InvalidResponse(err.to_string()))
}

async fn api_error(response: Response) -> SourceHostError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    SourceHostError::Api { status, message }
}

/// Decodes the line-wrapped base64 payload GitHub returns for file contents.
fn decode_content(encoded: &str) -> SourceHostResult<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|err| SourceHostError::InvalidResponse(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| SourceHostError::InvalidResponse(err.to_string()))
}
