use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{
    CompletionService, RagService, TranscriptStore,
    completion_service::CompletionServiceError,
    rag_service::RetrievalRequest,
};
use crate::application::services::RateLimiter;
use crate::domain::entities::{Message, UserTranscripts};

/// Snippets fetched per query.
const RETRIEVAL_K: i32 = 3;

/// Prior user messages carried as conversational context.
const CONTEXT_WINDOW: usize = 3;

#[derive(Debug)]
pub struct SendMessageRequest {
    pub user_id: String,
    pub current_chat: String,
    pub user_message: String,
    /// The user's last few prior queries in this chat, oldest first.
    pub context: Vec<String>,
    pub model_id: Uuid,
}

#[derive(Debug)]
pub struct SendMessageResponse {
    pub response: String,
}

#[derive(Debug)]
pub enum SendMessageError {
    RateLimited,
    /// The completion API rejected the request with its own 429.
    CompletionRateLimited,
    RetrievalFailed(String),
    CompletionFailed(String),
    DatabaseError(String),
}

impl std::fmt::Display for SendMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendMessageError::RateLimited => write!(f, "Rate limit reached"),
            SendMessageError::CompletionRateLimited => {
                write!(f, "Completion API rate limit reached")
            }
            SendMessageError::RetrievalFailed(msg) => write!(f, "Retrieval failed: {}", msg),
            SendMessageError::CompletionFailed(msg) => write!(f, "Completion failed: {}", msg),
            SendMessageError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for SendMessageError {}

/// Answers a user message against a chat's index: retrieval over the
/// combined query, then a grounded completion. The exchange is appended to
/// the user's transcript afterwards; transcript write failures never fail
/// the request.
pub struct SendMessageUseCase {
    rate_limiter: Arc<RateLimiter>,
    rag_service: Arc<dyn RagService>,
    completion_service: Arc<dyn CompletionService>,
    transcript_store: Arc<dyn TranscriptStore>,
}

impl SendMessageUseCase {
    pub fn new(
        rate_limiter: Arc<RateLimiter>,
        rag_service: Arc<dyn RagService>,
        completion_service: Arc<dyn CompletionService>,
        transcript_store: Arc<dyn TranscriptStore>,
    ) -> Self {
        Self {
            rate_limiter,
            rag_service,
            completion_service,
            transcript_store,
        }
    }

    pub async fn execute(
        &self,
        request: SendMessageRequest,
    ) -> Result<SendMessageResponse, SendMessageError> {
        let decision = self
            .rate_limiter
            .check(&request.user_id)
            .await
            .map_err(|e| SendMessageError::DatabaseError(e.to_string()))?;
        if decision.is_exceeded() {
            return Err(SendMessageError::RateLimited);
        }

        let chat_key = request.model_id.to_string();
        let transcripts = match self.transcript_store.load(&request.user_id).await {
            Ok(transcripts) => transcripts,
            Err(e) => {
                tracing::error!(user_id = %request.user_id, error = %e, "transcript load failed");
                UserTranscripts::default()
            }
        };

        // The client's own context wins; a bare request falls back to the
        // stored transcript so a fresh tab keeps its conversation thread.
        let context = if request.context.is_empty() {
            transcripts.context_window(&chat_key, CONTEXT_WINDOW)
        } else {
            request.context.clone()
        };

        let query = Message::combined_query(&context, &request.user_message);

        let snippets = self
            .rag_service
            .retrieve(RetrievalRequest {
                user_id: request.user_id.clone(),
                model_id: request.model_id,
                query,
                k: RETRIEVAL_K,
            })
            .await
            .map_err(|e| SendMessageError::RetrievalFailed(e.to_string()))?;

        let prompt = build_system_prompt(&snippets, &request.user_message, &context);

        let answer = self
            .completion_service
            .complete(&prompt)
            .await
            .map_err(|e| match e {
                CompletionServiceError::RateLimited => SendMessageError::CompletionRateLimited,
                CompletionServiceError::ApiError(msg)
                | CompletionServiceError::NetworkError(msg) => {
                    SendMessageError::CompletionFailed(msg)
                }
            })?;

        self.record_exchange(&request, transcripts, &chat_key, &answer)
            .await;

        Ok(SendMessageResponse { response: answer })
    }

    async fn record_exchange(
        &self,
        request: &SendMessageRequest,
        mut transcripts: UserTranscripts,
        chat_key: &str,
        answer: &str,
    ) {
        transcripts.append(chat_key, Message::from_user(request.user_message.clone()));
        transcripts.append(chat_key, Message::from_response(answer.to_string()));
        transcripts.current_chat = Some(request.current_chat.clone());

        if let Err(e) = self
            .transcript_store
            .save(&request.user_id, &transcripts)
            .await
        {
            tracing::error!(user_id = %request.user_id, error = %e, "transcript save failed");
        }
    }
}

/// System prompt grounding the completion in the retrieved snippets. The
/// model is told to stay close to the data and answer without formatting.
fn build_system_prompt(results: &serde_json::Value, query: &str, context: &[String]) -> String {
    format!(
        "Given the following results {} and the following query {}, with the previous queries \
         sent by the user being {}, return the best informed response to the current query with \
         no formatting. Stick to the data as much as possible but interpret where necessary.",
        results,
        query,
        context.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::application::ports::rag_service::{IngestRequest, RagServiceError};
    use crate::application::ports::transcript_store::TranscriptStoreError;
    use crate::application::services::RateLimiterConfig;
    use crate::domain::repositories::RateLimitRepository;
    use crate::domain::repositories::rate_limit_repository::RateLimitRepositoryError;
    use crate::domain::value_objects::QuotaDecision;

    struct RecordingRagService {
        queries: Mutex<Vec<String>>,
    }

    impl RecordingRagService {
        fn new() -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RagService for RecordingRagService {
        async fn ingest(&self, _request: IngestRequest) -> Result<(), RagServiceError> {
            unimplemented!("not exercised by messaging")
        }

        async fn retrieve(
            &self,
            request: RetrievalRequest,
        ) -> Result<serde_json::Value, RagServiceError> {
            self.queries.lock().unwrap().push(request.query);
            Ok(serde_json::json!(["snippet one", "snippet two"]))
        }

        async fn fetch_data(
            &self,
            _user_id: &str,
            _model_id: Uuid,
        ) -> Result<serde_json::Value, RagServiceError> {
            unimplemented!("not exercised by messaging")
        }
    }

    enum CompletionOutcome {
        EchoPrompt,
        RateLimited,
    }

    struct FakeCompletionService {
        outcome: CompletionOutcome,
        calls: AtomicUsize,
    }

    impl FakeCompletionService {
        fn new(outcome: CompletionOutcome) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionService for FakeCompletionService {
        async fn complete(&self, system_prompt: &str) -> Result<String, CompletionServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                CompletionOutcome::EchoPrompt => Ok(system_prompt.to_string()),
                CompletionOutcome::RateLimited => Err(CompletionServiceError::RateLimited),
            }
        }
    }

    struct InMemoryTranscriptStore {
        inner: Mutex<HashMap<String, UserTranscripts>>,
    }

    impl InMemoryTranscriptStore {
        fn new() -> Self {
            Self {
                inner: Mutex::new(HashMap::new()),
            }
        }

        fn get(&self, user_id: &str) -> UserTranscripts {
            self.inner
                .lock()
                .unwrap()
                .get(user_id)
                .cloned()
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl TranscriptStore for InMemoryTranscriptStore {
        async fn load(&self, user_id: &str) -> Result<UserTranscripts, TranscriptStoreError> {
            Ok(self.get(user_id))
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

    struct FixedRateLimitRepository {
        exceeded: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RateLimitRepository for FixedRateLimitRepository {
        async fn check_and_increment(
            &self,
            _user_id: &str,
            limit: i32,
            _window: Duration,
        ) -> Result<QuotaDecision, RateLimitRepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.exceeded {
                Ok(QuotaDecision::Exceeded)
            } else {
                Ok(QuotaDecision::Allowed {
                    remaining: limit - 1,
                })
            }
        }
    }

    struct Harness {
        use_case: SendMessageUseCase,
        rag: Arc<RecordingRagService>,
        completion: Arc<FakeCompletionService>,
        transcripts: Arc<InMemoryTranscriptStore>,
    }

    fn harness(exceeded: bool, completion: CompletionOutcome) -> Harness {
        let rag = Arc::new(RecordingRagService::new());
        let completion = Arc::new(FakeCompletionService::new(completion));
        let transcripts = Arc::new(InMemoryTranscriptStore::new());
        let rate_limiter = Arc::new(RateLimiter::new(
            Arc::new(FixedRateLimitRepository {
                exceeded,
                calls: AtomicUsize::new(0),
            }),
            RateLimiterConfig {
                limit: 500,
                window_secs: 86_400,
            },
        ));
        let use_case = SendMessageUseCase::new(
            rate_limiter,
            rag.clone(),
            completion.clone(),
            transcripts.clone(),
        );
        Harness {
            use_case,
            rag,
            completion,
            transcripts,
        }
    }

    fn request(model_id: Uuid) -> SendMessageRequest {
        SendMessageRequest {
            user_id: "u1".to_string(),
            current_chat: model_id.to_string(),
            user_message: "And how does it work?".to_string(),
            context: vec!["What is X?".to_string()],
            model_id,
        }
    }

    #[tokio::test]
    async fn test_retrieval_query_is_context_plus_message() {
        let h = harness(false, CompletionOutcome::EchoPrompt);

        h.use_case.execute(request(Uuid::new_v4())).await.unwrap();

        let queries = h.rag.queries.lock().unwrap();
        assert_eq!(queries.as_slice(), ["What is X? And how does it work?"]);
    }

    #[tokio::test]
    async fn test_prompt_embeds_snippets_query_and_context() {
        let h = harness(false, CompletionOutcome::EchoPrompt);

        let response = h.use_case.execute(request(Uuid::new_v4())).await.unwrap();

        assert!(response.response.contains("snippet one"));
        assert!(response.response.contains("And how does it work?"));
        assert!(response.response.contains("What is X?"));
        assert!(response.response.contains("no formatting"));
    }

    #[tokio::test]
    async fn test_exchange_recorded_in_transcript() {
        let h = harness(false, CompletionOutcome::EchoPrompt);
        let model_id = Uuid::new_v4();

        h.use_case.execute(request(model_id)).await.unwrap();

        let transcripts = h.transcripts.get("u1");
        let messages = &transcripts.messages[&model_id.to_string()];
        assert_eq!(messages.len(), 2);
        assert!(!messages[0].is_response);
        assert_eq!(messages[0].text, "And how does it work?");
        assert!(messages[1].is_response);
        assert_eq!(transcripts.current_chat, Some(model_id.to_string()));
    }

    #[tokio::test]
    async fn test_empty_context_falls_back_to_stored_transcript() {
        let h = harness(false, CompletionOutcome::EchoPrompt);
        let model_id = Uuid::new_v4();
        let chat_key = model_id.to_string();

        let mut state = UserTranscripts::default();
        state.append(&chat_key, Message::from_user("What is X?".to_string()));
        state.append(&chat_key, Message::from_response("X is ...".to_string()));
        h.transcripts.save("u1", &state).await.unwrap();

        let mut req = request(model_id);
        req.context = Vec::new();
        h.use_case.execute(req).await.unwrap();

        let queries = h.rag.queries.lock().unwrap();
        assert_eq!(queries.as_slice(), ["What is X? And how does it work?"]);
    }

    #[tokio::test]
    async fn test_rate_limited_performs_no_retrieval() {
        let h = harness(true, CompletionOutcome::EchoPrompt);

        let error = h.use_case.execute(request(Uuid::new_v4())).await.unwrap_err();

        assert!(matches!(error, SendMessageError::RateLimited));
        assert!(h.rag.queries.lock().unwrap().is_empty());
        assert_eq!(h.completion.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_completion_rate_limit_leaves_transcript_untouched() {
        let h = harness(false, CompletionOutcome::RateLimited);

        let error = h.use_case.execute(request(Uuid::new_v4())).await.unwrap_err();

        assert!(matches!(error, SendMessageError::CompletionRateLimited));
        assert!(h.transcripts.get("u1").is_empty());
    }
}
