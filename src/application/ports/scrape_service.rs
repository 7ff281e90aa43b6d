use async_trait::async_trait;

use crate::domain::value_objects::ScrapeRules;

#[derive(Debug)]
pub enum ScrapeServiceError {
    /// The scrape endpoint answered 404 — the service itself is down or the
    /// deployment is gone, not a property of the crawled site.
    ServiceDown,
    /// Crawl failure: unreachable url, timeout at the requested depth, or a
    /// non-success status from the service.
    ScrapeFailed(String),
    NetworkError(String),
}

impl std::fmt::Display for ScrapeServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeServiceError::ServiceDown => write!(f, "Scrape service unavailable"),
            ScrapeServiceError::ScrapeFailed(msg) => write!(f, "Scrape failed: {}", msg),
            ScrapeServiceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for ScrapeServiceError {}

/// Crawls a seed URL to `depth` linked pages and extracts the content
/// matching `rules`. The payload shape is owned by the external service; it
/// is carried opaquely into ingestion.
#[async_trait]
pub trait ScrapeService: Send + Sync {
    async fn scrape(
        &self,
        url: &str,
        depth: i32,
        rules: &ScrapeRules,
    ) -> Result<serde_json::Value, ScrapeServiceError>;
}
