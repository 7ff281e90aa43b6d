use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    DeleteChatUseCase, ListChatsUseCase,
    delete_chat::DeleteChatRequest,
    list_chats::ListChatsRequest,
};
use crate::presentation::http::dto::{ChatSummaryDto, ChatsQueryDto, ModelQueryDto};
use crate::presentation::http::errors::ApiError;

pub struct ChatHandler {
    list_chats_use_case: Arc<ListChatsUseCase>,
    delete_chat_use_case: Arc<DeleteChatUseCase>,
}

impl ChatHandler {
    pub fn new(
        list_chats_use_case: Arc<ListChatsUseCase>,
        delete_chat_use_case: Arc<DeleteChatUseCase>,
    ) -> Self {
        Self {
            list_chats_use_case,
            delete_chat_use_case,
        }
    }

    pub async fn list_chats(
        State(handler): State<Arc<ChatHandler>>,
        Query(params): Query<ChatsQueryDto>,
    ) -> Result<impl IntoResponse, ApiError> {
        let user_id = params.user_id.ok_or(ApiError::MissingFields)?;

        let chats = handler
            .list_chats_use_case
            .execute(ListChatsRequest { user_id })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "listing chats failed");
                ApiError::from(e)
            })?;

        let dtos: Vec<ChatSummaryDto> = chats.into_iter().map(ChatSummaryDto::from).collect();

        Ok((StatusCode::OK, Json(dtos)))
    }

    pub async fn delete_chat(
        State(handler): State<Arc<ChatHandler>>,
        Query(params): Query<ModelQueryDto>,
    ) -> Result<impl IntoResponse, ApiError> {
        let (Some(user_id), Some(model_id)) = (params.user_id, params.model_id) else {
            return Err(ApiError::MissingFields);
        };

        handler
            .delete_chat_use_case
            .execute(DeleteChatRequest { user_id, model_id })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "deleting chat failed");
                ApiError::from(e)
            })?;

        Ok(StatusCode::OK)
    }
}
