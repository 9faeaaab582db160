mod actions;
mod config;
mod errors;
mod models;
mod routes;
mod search;
mod sources;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::actions::email::Mailer;
use crate::actions::github::GitHubClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::sources::{build_http_client, default_sources};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Scout v{}", env!("CARGO_PKG_VERSION"));

    let http = build_http_client().context("Failed to build HTTP client")?;

    let sources = default_sources(&http, &config);
    info!(
        "Registered {} job boards (timeout {}s each)",
        sources.len(),
        config.source_timeout.as_secs()
    );

    if config.sendgrid_api_key.is_none() {
        info!("SENDGRID_API_KEY not set; /api/apply will require an apiKey per request");
    }

    let state = AppState {
        mailer: Mailer::new(http.clone(), &config),
        github: GitHubClient::new(http, config.github_api_url.clone()),
        sources: Arc::new(sources),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!("Dashboard: http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
