//! Source adapters — one per external job board.
//!
//! Each adapter fetches its board's listing endpoint and normalizes the
//! board-specific shape into `JobRecord`. Failures never escape an adapter:
//! `JobSource::fetch_jobs` logs them and reports an empty contribution.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::job::{JobBoard, JobRecord};

pub mod arbeitnow;
pub mod remoteok;
pub mod remotive;

pub use arbeitnow::ArbeitnowSource;
pub use remoteok::RemoteOkSource;
pub use remotive::RemotiveSource;

const HTTP_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("jobscout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How a single board fared during one aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceStatus {
    Ok,
    Failed,
    TimedOut,
}

/// Result of asking one board for listings. `jobs` is empty unless `status` is `Ok`.
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub board: JobBoard,
    pub status: SourceStatus,
    pub jobs: Vec<JobRecord>,
}

impl SourceOutcome {
    pub fn empty(board: JobBoard, status: SourceStatus) -> Self {
        Self {
            board,
            status,
            jobs: Vec::new(),
        }
    }
}

/// A job board adapter.
///
/// Implementors only provide `fetch`; callers use `fetch_jobs`, which absorbs
/// errors so that one broken board cannot sink a search.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn board(&self) -> JobBoard;

    async fn fetch(&self) -> Result<Vec<JobRecord>, SourceError>;

    async fn fetch_jobs(&self) -> SourceOutcome {
        let board = self.board();
        match self.fetch().await {
            Ok(jobs) => {
                debug!("{board} returned {} listings", jobs.len());
                SourceOutcome {
                    board,
                    status: SourceStatus::Ok,
                    jobs,
                }
            }
            Err(e) => {
                warn!("{board} API error: {e}");
                SourceOutcome::empty(board, SourceStatus::Failed)
            }
        }
    }
}

/// Builds the HTTP client shared by all adapters.
pub fn build_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
}

/// The production adapters, in registration order.
pub fn default_sources(client: &Client, config: &Config) -> Vec<Arc<dyn JobSource>> {
    vec![
        Arc::new(RemoteOkSource::new(client.clone(), config.remoteok_url.clone())),
        Arc::new(ArbeitnowSource::new(client.clone(), config.arbeitnow_url.clone())),
        Arc::new(RemotiveSource::new(client.clone(), config.remotive_url.clone())),
    ]
}

/// GETs `url` and decodes the body as `T`. Non-2xx statuses are errors.
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, SourceError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Decodes listings one at a time. A malformed listing is logged and skipped
/// instead of failing the whole board.
pub(crate) fn decode_listings<T: DeserializeOwned>(board: JobBoard, raw: Vec<Value>) -> Vec<T> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(listing) => Some(listing),
            Err(e) => {
                warn!("{board}: skipping malformed listing #{index}: {e}");
                None
            }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::testing::FakeSource;
    use super::*;

    #[tokio::test]
    async fn test_fetch_jobs_swallows_errors() {
        let outcome = FakeSource::failing(JobBoard::Remotive).fetch_jobs().await;
        assert_eq!(outcome.status, SourceStatus::Failed);
        assert!(outcome.jobs.is_empty());
    }

    #[tokio::test]
    async fn test_get_json_rejects_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api")
            .with_status(502)
            .create_async()
            .await;

        let client = build_http_client().unwrap();
        let result: Result<serde_json::Value, _> =
            get_json(&client, &format!("{}/api", server.url())).await;
        assert!(matches!(result, Err(SourceError::Status { status: 502 })));
    }

    #[tokio::test]
    async fn test_get_json_reports_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = build_http_client().unwrap();
        let result: Result<serde_json::Value, _> =
            get_json(&client, &format!("{}/api", server.url())).await;
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }
}
