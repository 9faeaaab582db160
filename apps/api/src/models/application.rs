use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Snapshot of a user's application log as committed to their repository.
/// Application entries are opaque client objects and are stored as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsDocument {
    pub applications: Vec<Value>,
    pub timestamp: String,
    pub total_applications: usize,
}

impl ApplicationsDocument {
    pub fn new(applications: Vec<Value>, at: DateTime<Utc>) -> Self {
        let total_applications = applications.len();
        Self {
            applications,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_applications,
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
