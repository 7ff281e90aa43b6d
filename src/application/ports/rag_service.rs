use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug)]
pub struct IngestRequest {
    pub user_id: String,
    pub model_id: Uuid,
    pub data: serde_json::Value,
    pub chunk_pages: bool,
}

#[derive(Debug)]
pub struct RetrievalRequest {
    pub user_id: String,
    pub model_id: Uuid,
    pub query: String,
    pub k: i32,
}

#[derive(Debug)]
pub enum RagServiceError {
    /// Non-success status from the service; `detail` carries the upstream
    /// error body's `detail` field when one was present.
    Upstream { status: u16, detail: Option<String> },
    NetworkError(String),
}

impl RagServiceError {
    pub fn detail(&self) -> Option<&str> {
        match self {
            RagServiceError::Upstream { detail, .. } => detail.as_deref(),
            RagServiceError::NetworkError(_) => None,
        }
    }
}

impl std::fmt::Display for RagServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RagServiceError::Upstream { status, detail } => match detail {
                Some(detail) => write!(f, "RAG service error ({}): {}", status, detail),
                None => write!(f, "RAG service error ({})", status),
            },
            RagServiceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for RagServiceError {}

/// The external retrieval service. It both builds the index for a chat
/// (ingest) and answers queries against it (retrieve); indexed content can
/// be read back raw for inspection.
#[async_trait]
pub trait RagService: Send + Sync {
    async fn ingest(&self, request: IngestRequest) -> Result<(), RagServiceError>;

    /// Top-k snippets relevant to `query` from the chat's index.
    async fn retrieve(
        &self,
        request: RetrievalRequest,
    ) -> Result<serde_json::Value, RagServiceError>;

    /// Raw indexed content for a chat, as stored upstream.
    async fn fetch_data(
        &self,
        user_id: &str,
        model_id: Uuid,
    ) -> Result<serde_json::Value, RagServiceError>;
}
