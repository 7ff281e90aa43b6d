use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use crate::application::ports::{
    RagService, ScrapeService,
    rag_service::IngestRequest,
    scrape_service::ScrapeServiceError,
};
use crate::application::services::RateLimiter;
use crate::domain::entities::ChatModel;
use crate::domain::repositories::{
    ModelRepository, model_repository::ModelRepositoryError,
};
use crate::domain::value_objects::ScrapeRules;

#[derive(Debug)]
pub struct ConfigureChatRequest {
    pub user_id: String,
    pub name: String,
    pub url: String,
    pub depth: i32,
    pub selected_tags: Vec<String>,
    pub base_url: Option<String>,
    pub ignore_fragments: bool,
    pub chunk_pages: bool,
}

#[derive(Debug)]
pub struct ConfigureChatResponse {
    pub model_id: Uuid,
    pub message: String,
}

#[derive(Debug)]
pub enum ConfigureChatError {
    RateLimited,
    InvalidUrl(String),
    Duplicate,
    DatabaseError(String),
    /// The scrape endpoint itself is unreachable (upstream 404).
    ScrapeServiceDown,
    ScrapeFailed(String),
    /// Indexing failed after a successful scrape; carries the upstream
    /// detail message when one was available.
    InitializationFailed(String),
}

impl std::fmt::Display for ConfigureChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigureChatError::RateLimited => write!(f, "Rate limit reached"),
            ConfigureChatError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            ConfigureChatError::Duplicate => write!(f, "Duplicate"),
            ConfigureChatError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ConfigureChatError::ScrapeServiceDown => write!(f, "Server down"),
            ConfigureChatError::ScrapeFailed(msg) => write!(f, "Scrape failed: {}", msg),
            ConfigureChatError::InitializationFailed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigureChatError {}

/// Creates a usable chat from a seed URL, or fails cleanly.
///
/// Two-step saga: the catalog row is inserted first so the external index
/// can be keyed by its id, then the scrape and ingestion calls run. Any
/// failure after the insert unwinds it with a compensating delete, so a row
/// never outlives a failed ingestion.
pub struct ConfigureChatUseCase {
    model_repository: Arc<dyn ModelRepository>,
    rate_limiter: Arc<RateLimiter>,
    scrape_service: Arc<dyn ScrapeService>,
    rag_service: Arc<dyn RagService>,
}

impl ConfigureChatUseCase {
    pub fn new(
        model_repository: Arc<dyn ModelRepository>,
        rate_limiter: Arc<RateLimiter>,
        scrape_service: Arc<dyn ScrapeService>,
        rag_service: Arc<dyn RagService>,
    ) -> Self {
        Self {
            model_repository,
            rate_limiter,
            scrape_service,
            rag_service,
        }
    }

    pub async fn execute(
        &self,
        request: ConfigureChatRequest,
    ) -> Result<ConfigureChatResponse, ConfigureChatError> {
        Url::parse(&request.url).map_err(|e| ConfigureChatError::InvalidUrl(e.to_string()))?;

        let decision = self
            .rate_limiter
            .check(&request.user_id)
            .await
            .map_err(|e| ConfigureChatError::DatabaseError(e.to_string()))?;
        if decision.is_exceeded() {
            return Err(ConfigureChatError::RateLimited);
        }

        let model = ChatModel::new(request.user_id.clone(), request.name.clone());
        self.model_repository
            .insert(&model)
            .await
            .map_err(|e| match e {
                ModelRepositoryError::Duplicate => ConfigureChatError::Duplicate,
                ModelRepositoryError::DatabaseError(msg) => ConfigureChatError::DatabaseError(msg),
            })?;

        let rules = ScrapeRules::new(
            request.base_url.clone(),
            request.ignore_fragments,
            request.selected_tags.clone(),
        );

        let scraped = match self
            .scrape_service
            .scrape(&request.url, request.depth, &rules)
            .await
        {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(model_id = %model.model_id(), error = %e, "scrape failed");
                self.clean_up(model.model_id()).await;
                return Err(match e {
                    ScrapeServiceError::ServiceDown => ConfigureChatError::ScrapeServiceDown,
                    ScrapeServiceError::ScrapeFailed(msg)
                    | ScrapeServiceError::NetworkError(msg) => {
                        ConfigureChatError::ScrapeFailed(msg)
                    }
                });
            }
        };

        let ingest = IngestRequest {
            user_id: request.user_id.clone(),
            model_id: model.model_id(),
            data: scraped,
            chunk_pages: request.chunk_pages,
        };

        if let Err(e) = self.rag_service.ingest(ingest).await {
            tracing::error!(model_id = %model.model_id(), error = %e, "initialization failed");
            self.clean_up(model.model_id()).await;
            let message = e
                .detail()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "An error occurred during initialization".to_string());
            return Err(ConfigureChatError::InitializationFailed(message));
        }

        Ok(ConfigureChatResponse {
            model_id: model.model_id(),
            message: "Chat configured successfully".to_string(),
        })
    }

    /// Best-effort compensating delete. A failure here leaves an orphaned
    /// row; it is logged and the caller still reports the primary error.
    async fn clean_up(&self, model_id: Uuid) {
        if let Err(e) = self.model_repository.delete_by_id(model_id).await {
            tracing::error!(model_id = %model_id, error = %e, "cleanup delete failed");
        }
    }
}
