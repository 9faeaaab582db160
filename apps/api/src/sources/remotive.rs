//! Remotive adapter. Listings come in a `jobs` envelope with numeric ids.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::models::job::{location_or_default, string_or_number, JobBoard, JobRecord};
use crate::sources::{decode_listings, get_json, JobSource, SourceError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemotiveResponse {
    jobs: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemotiveListing {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    title: Option<String>,
    company_name: Option<String>,
    candidate_required_location: Option<String>,
    description: Option<String>,
    url: Option<String>,
    tags: Option<Vec<String>>,
    job_type: Option<String>,
}

pub struct RemotiveSource {
    client: Client,
    url: String,
}

impl RemotiveSource {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl JobSource for RemotiveSource {
    fn board(&self) -> JobBoard {
        JobBoard::Remotive
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>, SourceError> {
        let response: RemotiveResponse = get_json(&self.client, &self.url).await?;
        Ok(normalize(response))
    }
}

fn normalize(response: RemotiveResponse) -> Vec<JobRecord> {
    decode_listings::<RemotiveListing>(JobBoard::Remotive, response.jobs.unwrap_or_default())
        .into_iter()
        .map(|job| JobRecord {
            id: job.id,
            title: job.title.unwrap_or_default(),
            company: job.company_name.unwrap_or_default(),
            location: location_or_default(job.candidate_required_location),
            description: job.description.unwrap_or_default(),
            url: job.url.unwrap_or_default(),
            tags: job.tags.unwrap_or_default(),
            job_types: job
                .job_type
                .filter(|t| !t.trim().is_empty())
                .into_iter()
                .collect(),
            source: JobBoard::Remotive,
            match_score: None,
            recruiter_email: None,
        })
        .collect()
}
