use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::RagService;

#[derive(Debug)]
pub struct GetChatDataRequest {
    pub user_id: String,
    pub model_id: Uuid,
}

#[derive(Debug)]
pub enum GetChatDataError {
    UpstreamError(String),
}

impl std::fmt::Display for GetChatDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetChatDataError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
        }
    }
}

impl std::error::Error for GetChatDataError {}

/// Passthrough to the retrieval service's raw indexed content, for
/// inspecting what a chat actually knows.
pub struct GetChatDataUseCase {
    rag_service: Arc<dyn RagService>,
}

impl GetChatDataUseCase {
    pub fn new(rag_service: Arc<dyn RagService>) -> Self {
        Self { rag_service }
    }

    pub async fn execute(
        &self,
        request: GetChatDataRequest,
    ) -> Result<serde_json::Value, GetChatDataError> {
        self.rag_service
            .fetch_data(&request.user_id, request.model_id)
            .await
            .map_err(|e| GetChatDataError::UpstreamError(e.to_string()))
    }
}
