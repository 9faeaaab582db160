//! Remote OK adapter.
//!
//! The endpoint returns a bare JSON array whose first element is a legal
//! notice rather than a listing.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::models::job::{location_or_default, string_or_number, JobBoard, JobRecord};
use crate::sources::{decode_listings, get_json, JobSource, SourceError};

/// Listings taken after the leading notice.
const MAX_LISTINGS: usize = 49;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RemoteOkListing {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    position: Option<String>,
    company: Option<String>,
    location: Option<String>,
    description: Option<String>,
    url: Option<String>,
    tags: Option<Vec<String>>,
}

pub struct RemoteOkSource {
    client: Client,
    url: String,
}

impl RemoteOkSource {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl JobSource for RemoteOkSource {
    fn board(&self) -> JobBoard {
        JobBoard::RemoteOk
    }

    async fn fetch(&self) -> Result<Vec<JobRecord>, SourceError> {
        let listings: Vec<Value> = get_json(&self.client, &self.url).await?;
        Ok(normalize(listings))
    }
}

fn normalize(raw: Vec<Value>) -> Vec<JobRecord> {
    let raw: Vec<Value> = raw.into_iter().skip(1).take(MAX_LISTINGS).collect();
    decode_listings::<RemoteOkListing>(JobBoard::RemoteOk, raw)
        .into_iter()
        .map(|job| JobRecord {
            id: job.id,
            title: job.position.unwrap_or_default(),
            company: job.company.unwrap_or_default(),
            location: location_or_default(job.location),
            description: job.description.unwrap_or_default(),
            url: job.url.unwrap_or_default(),
            tags: job.tags.unwrap_or_default(),
            job_types: Vec::new(),
            source: JobBoard::RemoteOk,
            match_score: None,
            recruiter_email: None,
        })
        .collect()
}
