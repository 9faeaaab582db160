//! Axum route handler for the job search pipeline.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::job::JobRecord;
use crate::search::aggregator::{aggregate, SourceReport};
use crate::search::ranking::{filter_and_sort, DEFAULT_MIN_MATCH};
use crate::search::scoring::score_all;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub keywords: String,
    /// Accepted from the dashboard but not used to filter results.
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub min_match: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub jobs: Vec<JobRecord>,
    pub sources: Vec<SourceReport>,
}

/// POST /api/search-jobs
///
/// Fetches every board, scores each listing against the keywords, and returns
/// those at or above `minMatch` (default 80), best first. Board failures only
/// show up in `sources`; the search itself still succeeds.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = payload?;

    let min_match = request.min_match.unwrap_or(DEFAULT_MIN_MATCH);
    debug!(
        "Search request: location={:?} jobType={:?}",
        request.location, request.job_type
    );

    let aggregation = aggregate(&state.sources, state.config.source_timeout).await;
    let jobs = filter_and_sort(score_all(aggregation.jobs, &request.keywords), min_match);

    info!(
        "Search for '{}' returned {} jobs (minMatch {min_match})",
        request.keywords,
        jobs.len()
    );

    Ok(Json(SearchResponse {
        success: true,
        jobs,
        sources: aggregation.reports,
    }))
}
