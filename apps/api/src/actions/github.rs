//! Commits the application log to a GitHub repository through the contents API.
//!
//! One push is one commit to `applications.json` on `main`. The access token
//! is passed per call.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::application::ApplicationsDocument;

pub const APPLICATIONS_PATH: &str = "applications.json";
pub const TARGET_BRANCH: &str = "main";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not serialize applications: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Returns `None` unless `value` is exactly two non-empty segments.
    pub fn parse(value: &str) -> Option<Self> {
        let (owner, name) = value.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ExistingFile {
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: String,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(client: Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Writes `applications` as a timestamped document, creating the file or
    /// replacing its current revision.
    pub async fn push_applications(
        &self,
        repo: &RepoId,
        token: &str,
        applications: Vec<Value>,
    ) -> Result<(), GitHubError> {
        let total = applications.len();
        let document = ApplicationsDocument::new(applications, Utc::now());
        let content = STANDARD.encode(document.to_pretty_json()?);

        let sha = self.current_sha(repo, token).await?;
        debug!(
            "{}/{}: {} {APPLICATIONS_PATH}",
            repo.owner,
            repo.name,
            if sha.is_some() { "updating" } else { "creating" }
        );

        let request = PutContentsRequest {
            message: format!("Update applications - {total} total"),
            content,
            branch: TARGET_BRANCH,
            sha,
        };

        let response = self
            .authorized(self.client.put(self.contents_url(repo)), token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        info!(
            "Pushed {total} applications to {}/{}",
            repo.owner, repo.name
        );
        Ok(())
    }

    /// Blob sha of the file on the target branch, or `None` if it does not exist yet.
    async fn current_sha(&self, repo: &RepoId, token: &str) -> Result<Option<String>, GitHubError> {
        let response = self
            .authorized(self.client.get(self.contents_url(repo)), token)
            .query(&[("ref", TARGET_BRANCH)])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let file: ExistingFile = response.json().await?;
                Ok(Some(file.sha))
            }
            _ => Err(api_error(response).await),
        }
    }

    fn contents_url(&self, repo: &RepoId) -> String {
        format!(
            "{}/repos/{}/{}/contents/{APPLICATIONS_PATH}",
            self.api_url, repo.owner, repo.name
        )
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .bearer_auth(token)
            .header("accept", "application/vnd.github+json")
            .header("x-github-api-version", GITHUB_API_VERSION)
    }
}

async fn api_error(response: reqwest::Response) -> GitHubError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GitHubErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    GitHubError::Api { status, message }
}
