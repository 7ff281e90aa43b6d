use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::Serialize;
use std::env;
use std::time::Duration;

use crate::application::ports::scrape_service::{ScrapeService, ScrapeServiceError};
use crate::domain::value_objects::ScrapeRules;

#[derive(Debug, Clone)]
pub struct ScrapeClientConfig {
    pub endpoint: String,
    pub auth_token: String,
    /// Crawls at depth are slow; this bounds the whole request.
    pub timeout_secs: u64,
}

impl Default for ScrapeClientConfig {
    fn default() -> Self {
        let endpoint = env::var("SCRAPE_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:8001/scrape".to_string());
        let auth_token = env::var("MIRAGE_AUTH_TOKEN_MODAL").unwrap_or_default();

        Self {
            endpoint,
            auth_token,
            timeout_secs: 120,
        }
    }
}

#[derive(Serialize)]
struct ScrapeRequestBody<'a> {
    url: &'a str,
    depth: i32,
    rules: &'a ScrapeRules,
}

#[derive(Debug, Clone)]
pub struct ScrapeClient {
    client: Client,
    config: ScrapeClientConfig,
}

impl ScrapeClient {
    pub fn new(config: ScrapeClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(ScrapeClientConfig::default())
    }
}

#[async_trait]
impl ScrapeService for ScrapeClient {
    async fn scrape(
        &self,
        url: &str,
        depth: i32,
        rules: &ScrapeRules,
    ) -> Result<serde_json::Value, ScrapeServiceError> {
        let body = ScrapeRequestBody { url, depth, rules };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.auth_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScrapeServiceError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ScrapeServiceError::ServiceDown);
        }

        if !status.is_success() {
            return Err(ScrapeServiceError::ScrapeFailed(format!(
                "scrape service returned {}",
                status
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ScrapeServiceError::ScrapeFailed(e.without_url().to_string()))
    }
}
