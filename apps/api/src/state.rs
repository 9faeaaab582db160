use std::sync::Arc;

use crate::actions::email::Mailer;
use crate::actions::github::GitHubClient;
use crate::config::Config;
use crate::sources::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only; per-request credentials never land in it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Job board adapters in registration order. Search output follows this order.
    pub sources: Arc<Vec<Arc<dyn JobSource>>>,
    pub mailer: Mailer,
    pub github: GitHubClient,
}
