use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::TranscriptStore;
use crate::domain::repositories::ModelRepository;

#[derive(Debug)]
pub struct DeleteChatRequest {
    pub user_id: String,
    pub model_id: Uuid,
}

#[derive(Debug)]
pub struct DeleteChatResponse {
    pub deleted: bool,
}

#[derive(Debug)]
pub enum DeleteChatError {
    DatabaseError(String),
}

impl std::fmt::Display for DeleteChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteChatError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteChatError {}

/// Removes a chat from the catalog and drops its transcript. The remote
/// index stays behind: the retrieval service exposes no deletion endpoint.
pub struct DeleteChatUseCase {
    model_repository: Arc<dyn ModelRepository>,
    transcript_store: Arc<dyn TranscriptStore>,
}

impl DeleteChatUseCase {
    pub fn new(
        model_repository: Arc<dyn ModelRepository>,
        transcript_store: Arc<dyn TranscriptStore>,
    ) -> Self {
        Self {
            model_repository,
            transcript_store,
        }
    }

    pub async fn execute(
        &self,
        request: DeleteChatRequest,
    ) -> Result<DeleteChatResponse, DeleteChatError> {
        let deleted = self
            .model_repository
            .delete(&request.user_id, request.model_id)
            .await
            .map_err(|e| DeleteChatError::DatabaseError(e.to_string()))?;

        if deleted {
            self.drop_transcript(&request).await;
            tracing::debug!(
                model_id = %request.model_id,
                "remote index left in place, upstream has no delete endpoint"
            );
        }

        Ok(DeleteChatResponse { deleted })
    }

    /// Transcript cleanup is best-effort; a failure leaves stale session
    /// state, not a broken catalog.
    async fn drop_transcript(&self, request: &DeleteChatRequest) {
        let chat_key = request.model_id.to_string();

        let mut transcripts = match self.transcript_store.load(&request.user_id).await {
            Ok(transcripts) => transcripts,
            Err(e) => {
                tracing::error!(user_id = %request.user_id, error = %e, "transcript load failed");
                return;
            }
        };

        if !transcripts.remove_chat(&chat_key) {
            return;
        }

        let result = if transcripts.is_empty() {
            self.transcript_store.clear(&request.user_id).await
        } else {
            self.transcript_store
                .save(&request.user_id, &transcripts)
                .await
        };

        if let Err(e) = result {
            tracing::error!(user_id = %request.user_id, error = %e, "transcript cleanup failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::application::ports::transcript_store::TranscriptStoreError;
    use crate::domain::entities::{ChatModel, Message, UserTranscripts};
    use crate::domain::repositories::model_repository::ModelRepositoryError;

    struct InMemoryModelRepository {
        rows: Mutex<Vec<ChatModel>>,
    }

    #[async_trait]
    impl ModelRepository for InMemoryModelRepository {
        async fn insert(&self, model: &ChatModel) -> Result<(), ModelRepositoryError> {
            self.rows.lock().unwrap().push(model.clone());
            Ok(())
        }

        async fn list_for_user(
            &self,
            user_id: &str,
        ) -> Result<Vec<ChatModel>, ModelRepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.is_owned_by(user_id))
                .cloned()
                .collect())
        }

        async fn delete(
            &self,
            user_id: &str,
            model_id: Uuid,
        ) -> Result<bool, ModelRepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| !(r.is_owned_by(user_id) && r.model_id() == model_id));
            Ok(rows.len() < before)
        }

        async fn delete_by_id(&self, model_id: Uuid) -> Result<bool, ModelRepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.model_id() != model_id);
            Ok(rows.len() < before)
        }
    }

    struct InMemoryTranscriptStore {
        inner: Mutex<HashMap<String, UserTranscripts>>,
    }

    #[async_trait]
    impl TranscriptStore for InMemoryTranscriptStore {
        async fn load(&self, user_id: &str) -> Result<UserTranscripts, TranscriptStoreError> {
            Ok(self
                .inner
                .lock()
                .unwrap()
                .get(user_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn save(
            &self,
            user_id: &str,
            transcripts: &UserTranscripts,
        ) -> Result<(), TranscriptStoreError> {
            self.inner
                .lock()
                .unwrap()
                .insert(user_id.to_string(), transcripts.clone());
            Ok(())
        }

        async fn clear(&self, user_id: &str) -> Result<(), TranscriptStoreError> {
            self.inner.lock().unwrap().remove(user_id);
            Ok(())
        }
    }

    async fn harness() -> (
        DeleteChatUseCase,
        Arc<InMemoryModelRepository>,
        Arc<InMemoryTranscriptStore>,
        ChatModel,
    ) {
        let models = Arc::new(InMemoryModelRepository {
            rows: Mutex::new(Vec::new()),
        });
        let transcripts = Arc::new(InMemoryTranscriptStore {
            inner: Mutex::new(HashMap::new()),
        });

        let chat = ChatModel::new("u1".to_string(), "docs".to_string());
        models.insert(&chat).await.unwrap();

        let mut state = UserTranscripts::default();
        state.append(
            &chat.model_id().to_string(),
            Message::from_user("hello".to_string()),
        );
        state.append("other-chat", Message::from_user("hi".to_string()));
        state.current_chat = Some(chat.model_id().to_string());
        transcripts.save("u1", &state).await.unwrap();

        let use_case = DeleteChatUseCase::new(models.clone(), transcripts.clone());
        (use_case, models, transcripts, chat)
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_transcript_entry() {
        let (use_case, models, transcripts, chat) = harness().await;

        let response = use_case
            .execute(DeleteChatRequest {
                user_id: "u1".to_string(),
                model_id: chat.model_id(),
            })
            .await
            .unwrap();

        assert!(response.deleted);
        assert!(models.list_for_user("u1").await.unwrap().is_empty());

        let state = transcripts.load("u1").await.unwrap();
        assert!(!state.messages.contains_key(&chat.model_id().to_string()));
        assert!(state.messages.contains_key("other-chat"));
        assert!(state.current_chat.is_none());
    }

    #[tokio::test]
    async fn test_delete_requires_matching_owner() {
        let (use_case, models, _, chat) = harness().await;

        let response = use_case
            .execute(DeleteChatRequest {
                user_id: "someone-else".to_string(),
                model_id: chat.model_id(),
            })
            .await
            .unwrap();

        assert!(!response.deleted);
        assert_eq!(models.list_for_user("u1").await.unwrap().len(), 1);
    }
}
