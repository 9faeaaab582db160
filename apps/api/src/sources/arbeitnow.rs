//! Arbeitnow adapter. Listings are wrapped in a `data` envelope and keyed by slug.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::models::job::{location_or_default, JobBoard, JobRecord};
use crate::sources::{decode_listings, get_json, JobSource, SourceError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArbeitnowResponse {
    data: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArbeitnowListing {
    slug: Option<String>,
    title: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    description: Option<String>,
    url: Option<String>,
    tags: Option<Vec<String>>,
    job_types: Option<Vec<String>>,
}

pub struct ArbeitnowSource {
    client: Client,
    url: String,
}

impl ArbeitnowSource {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl JobSource for ArbeitnowSource {
    fn board(&self) -> JobBoard {
        JobBoard::Arbeitnow
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>, SourceError> {
        let response: ArbeitnowResponse = get_json(&self.client, &self.url).await?;
        Ok(normalize(response))
    }
}

fn normalize(response: ArbeitnowResponse) -> Vec<JobRecord> {
    decode_listings::<ArbeitnowListing>(JobBoard::Arbeitnow, response.data.unwrap_or_default())
        .into_iter()
        .map(|job| JobRecord {
            id: job.slug.unwrap_or_default(),
            title: job.title.unwrap_or_default(),
            company: job.company_name.unwrap_or_default(),
            location: location_or_default(job.location),
            description: job.description.unwrap_or_default(),
            url: job.url.unwrap_or_default(),
            tags: job.tags.unwrap_or_default(),
            job_types: job.job_types.unwrap_or_default(),
            source: JobBoard::Arbeitnow,
            match_score: None,
            recruiter_email: None,
        })
        .collect()
}
