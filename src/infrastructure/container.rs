use std::{path::PathBuf, sync::Arc};

use crate::{
    application::{
        ports::{CompletionService, RagService, ScrapeService, TranscriptStore},
        services::{RateLimiter, RateLimiterConfig},
        use_cases::{
            ConfigureChatUseCase, DeleteChatUseCase, GetChatDataUseCase, ListChatsUseCase,
            SendMessageUseCase,
        },
    },
    domain::repositories::{ModelRepository, RateLimitRepository},
    infrastructure::{
        database::{
            create_connection_pool, get_connection_from_pool,
            repositories::{PostgresModelRepository, PostgresRateLimitRepository},
            run_migrations,
        },
        external_services::{CompletionClient, RagClient, ScrapeClient},
        storage::JsonTranscriptStore,
    },
    presentation::http::handlers::{ChatHandler, ConfigHandler, DataHandler, MessageHandler},
};

pub struct AppContainer {
    // Repositories
    pub model_repository: Arc<dyn ModelRepository>,
    pub rate_limit_repository: Arc<dyn RateLimitRepository>,

    // External services and session state
    pub scrape_service: Arc<dyn ScrapeService>,
    pub rag_service: Arc<dyn RagService>,
    pub completion_service: Arc<dyn CompletionService>,
    pub transcript_store: Arc<dyn TranscriptStore>,

    // Application services
    pub rate_limiter: Arc<RateLimiter>,

    // Use cases
    pub list_chats_use_case: Arc<ListChatsUseCase>,
    pub configure_chat_use_case: Arc<ConfigureChatUseCase>,
    pub send_message_use_case: Arc<SendMessageUseCase>,
    pub delete_chat_use_case: Arc<DeleteChatUseCase>,
    pub get_chat_data_use_case: Arc<GetChatDataUseCase>,

    // HTTP handlers
    pub chat_handler: Arc<ChatHandler>,
    pub config_handler: Arc<ConfigHandler>,
    pub message_handler: Arc<MessageHandler>,
    pub data_handler: Arc<DataHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Database pool and schema
        let db_pool = create_connection_pool()?;
        let mut conn = get_connection_from_pool(&db_pool)
            .map_err(|e| format!("Failed to get database connection: {}", e))?;
        run_migrations(&mut conn).map_err(|e| format!("Failed to run migrations: {}", e))?;
        drop(conn);

        // Repositories
        let model_repository: Arc<dyn ModelRepository> =
            Arc::new(PostgresModelRepository::new(db_pool.clone()));
        let rate_limit_repository: Arc<dyn RateLimitRepository> =
            Arc::new(PostgresRateLimitRepository::new(db_pool));

        // External services
        let scrape_service: Arc<dyn ScrapeService> = Arc::new(ScrapeClient::from_env()?);
        let rag_service: Arc<dyn RagService> = Arc::new(RagClient::from_env()?);
        let completion_service: Arc<dyn CompletionService> =
            Arc::new(CompletionClient::from_env()?);

        // Session state
        let transcript_dir = PathBuf::from(
            std::env::var("TRANSCRIPT_DIR").unwrap_or_else(|_| "./transcripts".to_string()),
        );
        let transcript_store: Arc<dyn TranscriptStore> =
            Arc::new(JsonTranscriptStore::new(transcript_dir));

        // Application services
        let rate_limiter = Arc::new(RateLimiter::new(
            rate_limit_repository.clone(),
            RateLimiterConfig::default(),
        ));

        // Use cases
        let list_chats_use_case = Arc::new(ListChatsUseCase::new(model_repository.clone()));

        let configure_chat_use_case = Arc::new(ConfigureChatUseCase::new(
            model_repository.clone(),
            rate_limiter.clone(),
            scrape_service.clone(),
            rag_service.clone(),
        ));

        let send_message_use_case = Arc::new(SendMessageUseCase::new(
            rate_limiter.clone(),
            rag_service.clone(),
            completion_service.clone(),
            transcript_store.clone(),
        ));

        let delete_chat_use_case = Arc::new(DeleteChatUseCase::new(
            model_repository.clone(),
            transcript_store.clone(),
        ));

        let get_chat_data_use_case = Arc::new(GetChatDataUseCase::new(rag_service.clone()));

        // HTTP handlers
        let chat_handler = Arc::new(ChatHandler::new(
            list_chats_use_case.clone(),
            delete_chat_use_case.clone(),
        ));
        let config_handler = Arc::new(ConfigHandler::new(configure_chat_use_case.clone()));
        let message_handler = Arc::new(MessageHandler::new(send_message_use_case.clone()));
        let data_handler = Arc::new(DataHandler::new(get_chat_data_use_case.clone()));

        Ok(Self {
            model_repository,
            rate_limit_repository,
            scrape_service,
            rag_service,
            completion_service,
            transcript_store,
            rate_limiter,
            list_chats_use_case,
            configure_chat_use_case,
            send_message_use_case,
            delete_chat_use_case,
            get_chat_data_use_case,
            chat_handler,
            config_handler,
            message_handler,
            data_handler,
        })
    }
}
