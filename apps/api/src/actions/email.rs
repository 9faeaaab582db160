//! Application email delivery through the SendGrid v3 mail API.
//!
//! The API key is supplied on every send; the mailer itself holds no credentials.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::models::job::JobRecord;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail provider rejected the message (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A fully composed application email.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ApplicationEmail {
    /// Addresses the job's recruiter, or `fallback_recipient` when the record has none.
    pub fn compose(job: &JobRecord, body: &str, sender: &str, fallback_recipient: &str) -> Self {
        let to = job
            .recruiter_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(fallback_recipient)
            .to_string();

        Self {
            to,
            from: sender.to_string(),
            subject: format!("Application for {} Position", job.title),
            text: body.to_string(),
            html: body.replace('\n', "<br>"),
        }
    }
}

#[derive(Serialize)]
struct SendGridRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Clone)]
pub struct Mailer {
    client: Client,
    api_url: String,
    sender: String,
    fallback_recipient: String,
}

impl Mailer {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_url: config.sendgrid_api_url.clone(),
            sender: config.sender_email.clone(),
            fallback_recipient: config.fallback_recipient.clone(),
        }
    }

    pub fn compose(&self, job: &JobRecord, body: &str) -> ApplicationEmail {
        ApplicationEmail::compose(job, body, &self.sender, &self.fallback_recipient)
    }

    /// Sends one email. Any non-2xx answer from the provider is an error.
    pub async fn send(&self, api_key: &str, email: &ApplicationEmail) -> Result<(), EmailError> {
        let request = SendGridRequest {
            personalizations: vec![Personalization {
                to: vec![Address { email: &email.to }],
            }],
            from: Address { email: &email.from },
            subject: &email.subject,
            content: vec![
                Content {
                    content_type: "text/plain",
                    value: &email.text,
                },
                Content {
                    content_type: "text/html",
                    value: &email.html,
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!("Application email sent to {} ({})", email.to, email.subject);
        Ok(())
    }
}
