pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::actions::handlers as actions;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/search-jobs", post(search::handle_search_jobs))
        .route("/api/apply", post(actions::handle_apply))
        .route("/api/github-push", post(actions::handle_github_push))
        // Dashboard and other static files
        .fallback_service(assets)
        .with_state(state)
}
