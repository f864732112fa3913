//! HTTP client for the external college-statistics API

use crate::sources::CollegeSource;
use crate::types::CollegeCandidate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct CollegeStatsClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    colleges: Vec<StatsRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsRecord {
    name: String,
    #[serde(default)]
    avg_sat: Option<f64>,
    #[serde(default)]
    avg_gpa: Option<f64>,
    #[serde(default)]
    avg_extracurriculars: Option<f64>,
    #[serde(default)]
    majors: Vec<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    tuition: Option<f64>,
}

impl From<StatsRecord> for CollegeCandidate {
    fn from(r: StatsRecord) -> Self {
        CollegeCandidate {
            name: r.name,
            avg_sat: r.avg_sat.filter(|v| *v > 0.0),
            avg_gpa: r.avg_gpa.filter(|v| *v > 0.0),
            avg_extracurriculars: r.avg_extracurriculars.filter(|v| *v > 0.0),
            majors: r.majors,
            state: r.state.filter(|s| !s.trim().is_empty()),
            city: r.city.filter(|s| !s.trim().is_empty()),
            tuition: r.tuition.filter(|v| *v > 0.0),
        }
    }
}

impl CollegeStatsClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    fn lookup_url(&self, name: &str) -> String {
        let mut url = format!("{}/colleges?name={}", self.base_url, urlencoding::encode(name));
        if let Some(key) = &self.api_key {
            url.push_str("&api_key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    /// Fetch statistics for one college by name
    pub async fn fetch(&self, name: &str) -> Result<Option<CollegeCandidate>> {
        let url = self.lookup_url(name);
        debug!("Fetching college stats for '{}'", name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to call college stats API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("College stats API error {}: {}", status, body);
        }

        let parsed: StatsResponse = response
            .json()
            .await
            .context("Failed to parse college stats response")?;

        Ok(pick_record(name, parsed.colleges))
    }

    /// Health check
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

/// Only an exact (case-insensitive) name match counts; a near hit belongs to another school
fn pick_record(name: &str, records: Vec<StatsRecord>) -> Option<CollegeCandidate> {
    let wanted = name.trim().to_lowercase();
    let found = records
        .into_iter()
        .find(|r| r.name.trim().to_lowercase() == wanted)
        .map(CollegeCandidate::from);
    if found.is_none() {
        debug!("College stats API returned no exact match for '{}'", name);
    }
    found
}

#[async_trait]
impl CollegeSource for CollegeStatsClient {
    fn name(&self) -> &'static str {
        "college_stats_api"
    }

    async fn lookup(&self, name: &str) -> Result<Option<CollegeCandidate>> {
        self.fetch(name).await
    }
}
