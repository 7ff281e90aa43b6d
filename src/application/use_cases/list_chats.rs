use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::ModelRepository;

#[derive(Debug)]
pub struct ListChatsRequest {
    pub user_id: String,
}

#[derive(Debug)]
pub struct ChatSummary {
    pub model_id: Uuid,
    pub model_name: String,
}

#[derive(Debug)]
pub enum ListChatsError {
    DatabaseError(String),
}

impl std::fmt::Display for ListChatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListChatsError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ListChatsError {}

pub struct ListChatsUseCase {
    model_repository: Arc<dyn ModelRepository>,
}

impl ListChatsUseCase {
    pub fn new(model_repository: Arc<dyn ModelRepository>) -> Self {
        Self { model_repository }
    }

    pub async fn execute(
        &self,
        request: ListChatsRequest,
    ) -> Result<Vec<ChatSummary>, ListChatsError> {
        let chats = self
            .model_repository
            .list_for_user(&request.user_id)
            .await
            .map_err(|e| ListChatsError::DatabaseError(e.to_string()))?;

        Ok(chats
            .into_iter()
            .map(|chat| ChatSummary {
                model_id: chat.model_id(),
                model_name: chat.model_name().to_string(),
            })
            .collect())
    }
}
