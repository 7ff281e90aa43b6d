use async_trait::async_trait;
use chrono::Duration;

use crate::domain::value_objects::QuotaDecision;

#[derive(Debug)]
pub enum RateLimitRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for RateLimitRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateLimitRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for RateLimitRepositoryError {}

#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    /// Atomically checks and advances the user's counter. The whole
    /// read-compare-increment sequence must be one unit: concurrent requests
    /// from the same user may not race past the ceiling, and a rejected
    /// request leaves the counter unchanged. A counter older than `window`
    /// restarts at 1.
    async fn check_and_increment(
        &self,
        user_id: &str,
        limit: i32,
        window: Duration,
    ) -> Result<QuotaDecision, RateLimitRepositoryError>;
}
