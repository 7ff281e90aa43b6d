use async_trait::async_trait;

#[derive(Debug)]
pub enum CompletionServiceError {
    /// The completion API itself rejected the request with 429.
    RateLimited,
    ApiError(String),
    NetworkError(String),
}

impl std::fmt::Display for CompletionServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionServiceError::RateLimited => write!(f, "Completion API rate limited"),
            CompletionServiceError::ApiError(msg) => write!(f, "Completion API error: {}", msg),
            CompletionServiceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for CompletionServiceError {}

/// Produces a natural-language answer from a fully assembled system prompt.
/// Prompt construction stays with the caller; this port only carries text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, system_prompt: &str) -> Result<String, CompletionServiceError>;
}
