//! Axum route handlers for the side-effect actions.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::github::RepoId;
use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job: JobRecord,
    pub email_content: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubPushRequest {
    pub repo: String,
    pub token: String,
    pub applications: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    fn ok(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/apply
///
/// Emails the application. A key in the request overrides `SENDGRID_API_KEY`.
pub async fn handle_apply(
    State(state): State<AppState>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, AppError> {
    let Json(request) = payload?;

    let api_key = request
        .api_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| state.config.sendgrid_api_key.clone())
        .ok_or_else(|| {
            AppError::Validation(
                "No mail provider API key: pass apiKey or set SENDGRID_API_KEY".to_string(),
            )
        })?;

    let email = state.mailer.compose(&request.job, &request.email_content);
    state.mailer.send(&api_key, &email).await?;

    Ok(ActionResponse::ok("Application sent successfully"))
}

/// POST /api/github-push
///
/// Commits the supplied application records to `applications.json` in `repo`.
pub async fn handle_github_push(
    State(state): State<AppState>,
    payload: Result<Json<GitHubPushRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, AppError> {
    let Json(request) = payload?;

    let repo = RepoId::parse(&request.repo).ok_or_else(|| {
        AppError::Validation(format!(
            "repo must look like owner/name, got '{}'",
            request.repo
        ))
    })?;

    state
        .github
        .push_applications(&repo, &request.token, request.applications)
        .await?;

    Ok(ActionResponse::ok("Pushed to GitHub successfully"))
}
