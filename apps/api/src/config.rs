use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const REMOTEOK_URL: &str = "https://remoteok.com/api";
pub const ARBEITNOW_URL: &str = "https://www.arbeitnow.com/api/job-board-api";
pub const REMOTIVE_URL: &str = "https://remotive.com/api/remote-jobs";
pub const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Application configuration loaded from environment variables.
/// Nothing is required: every value falls back to a default, and the mail
/// provider key may instead be supplied per request.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub sendgrid_api_key: Option<String>,
    pub sender_email: String,
    pub fallback_recipient: String,
    pub static_dir: PathBuf,
    /// Upper bound for a single job board call during a search.
    pub source_timeout: Duration,
    pub remoteok_url: String,
    pub arbeitnow_url: String,
    pub remotive_url: String,
    pub sendgrid_api_url: String,
    pub github_api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            rust_log: "info".to_string(),
            sendgrid_api_key: None,
            sender_email: "applications@example.com".to_string(),
            fallback_recipient: "hiring@example.com".to_string(),
            static_dir: PathBuf::from("."),
            source_timeout: Duration::from_secs(15),
            remoteok_url: REMOTEOK_URL.to_string(),
            arbeitnow_url: ARBEITNOW_URL.to_string(),
            remotive_url: REMOTIVE_URL.to_string(),
            sendgrid_api_url: SENDGRID_API_URL.to_string(),
            github_api_url: GITHUB_API_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", defaults.rust_log),
            sendgrid_api_key: optional_env("SENDGRID_API_KEY"),
            sender_email: env_or("SENDER_EMAIL", defaults.sender_email),
            fallback_recipient: env_or("FALLBACK_RECIPIENT", defaults.fallback_recipient),
            static_dir: optional_env("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            source_timeout: match optional_env("SOURCE_TIMEOUT_SECS") {
                Some(secs) => Duration::from_secs(
                    secs.parse::<u64>()
                        .context("SOURCE_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.source_timeout,
            },
            remoteok_url: env_or("REMOTEOK_URL", defaults.remoteok_url),
            arbeitnow_url: env_or("ARBEITNOW_URL", defaults.arbeitnow_url),
            remotive_url: env_or("REMOTIVE_URL", defaults.remotive_url),
            sendgrid_api_url: env_or("SENDGRID_API_URL", defaults.sendgrid_api_url),
            github_api_url: env_or("GITHUB_API_URL", defaults.github_api_url),
        })
    }
}

/// Returns the variable's value, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: String) -> String {
    optional_env(key).unwrap_or(default)
}
