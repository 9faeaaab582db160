use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default location for listings whose upstream leaves it blank.
pub const DEFAULT_LOCATION: &str = "Remote";

/// The job board a record was fetched from. Serialized with the boards' own spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobBoard {
    #[serde(rename = "RemoteOK")]
    RemoteOk,
    Arbeitnow,
    Remotive,
}

impl JobBoard {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobBoard::RemoteOk => "RemoteOK",
            JobBoard::Arbeitnow => "Arbeitnow",
            JobBoard::Remotive => "Remotive",
        }
    }
}

impl fmt::Display for JobBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job posting normalized from any board.
///
/// `id` is only unique within its `source`. `match_score` stays `None` until the
/// record has been scored against a keyword list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default = "default_board")]
    pub source: JobBoard,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    /// Only ever set by clients echoing a record back in an apply request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_email: Option<String>,
}

/// Records echoed back by clients without a `source` are treated as RemoteOK.
fn default_board() -> JobBoard {
    JobBoard::RemoteOk
}

impl JobRecord {
    /// Lowercased text the scorer searches: title, description and tags
    /// separated by single spaces.
    pub fn haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.tags.join(" ")
        )
        .to_lowercase()
    }
}

/// Upstream ids arrive as JSON numbers on some boards and strings on others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// Picks the upstream location, falling back to `DEFAULT_LOCATION` when absent or blank.
pub fn location_or_default(location: Option<String>) -> String {
    location
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string())
}
