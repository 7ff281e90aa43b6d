use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ChatModel;

#[derive(Debug)]
pub enum ModelRepositoryError {
    /// The `(user_id, model_name)` pair already exists.
    Duplicate,
    DatabaseError(String),
}

impl std::fmt::Display for ModelRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelRepositoryError::Duplicate => write!(f, "Duplicate model name for user"),
            ModelRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ModelRepositoryError {}

#[async_trait]
pub trait ModelRepository: Send + Sync {
    async fn insert(&self, model: &ChatModel) -> Result<(), ModelRepositoryError>;

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ChatModel>, ModelRepositoryError>;

    /// Deletes the row matching `(user_id, model_id)`. Returns whether a row
    /// was actually removed.
    async fn delete(&self, user_id: &str, model_id: Uuid) -> Result<bool, ModelRepositoryError>;

    /// Compensating delete by id alone, used when unwinding a failed
    /// configuration. Idempotent.
    async fn delete_by_id(&self, model_id: Uuid) -> Result<bool, ModelRepositoryError>;
}
