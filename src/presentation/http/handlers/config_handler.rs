use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::ConfigureChatUseCase;
use crate::presentation::http::dto::{ConfigureChatRequestDto, MessageResponseDto};
use crate::presentation::http::errors::ApiError;

pub struct ConfigHandler {
    configure_chat_use_case: Arc<ConfigureChatUseCase>,
}

impl ConfigHandler {
    pub fn new(configure_chat_use_case: Arc<ConfigureChatUseCase>) -> Self {
        Self {
            configure_chat_use_case,
        }
    }

    pub async fn configure_chat(
        State(handler): State<Arc<ConfigHandler>>,
        Json(body): Json<ConfigureChatRequestDto>,
    ) -> Result<impl IntoResponse, ApiError> {
        let request = body.validate()?;

        let response = handler
            .configure_chat_use_case
            .execute(request)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "chat configuration failed");
                ApiError::from(e)
            })?;

        Ok((
            StatusCode::OK,
            Json(MessageResponseDto {
                message: response.message,
            }),
        ))
    }
}
