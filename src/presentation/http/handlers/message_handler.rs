use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::SendMessageUseCase;
use crate::presentation::http::dto::{SendMessageRequestDto, SendMessageResponseDto};
use crate::presentation::http::errors::ApiError;

pub struct MessageHandler {
    send_message_use_case: Arc<SendMessageUseCase>,
}

impl MessageHandler {
    pub fn new(send_message_use_case: Arc<SendMessageUseCase>) -> Self {
        Self {
            send_message_use_case,
        }
    }

    pub async fn send_message(
        State(handler): State<Arc<MessageHandler>>,
        Json(body): Json<SendMessageRequestDto>,
    ) -> Result<impl IntoResponse, ApiError> {
        let request = body.validate()?;

        let response = handler
            .send_message_use_case
            .execute(request)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "message handling failed");
                ApiError::from(e)
            })?;

        Ok((
            StatusCode::OK,
            Json(SendMessageResponseDto {
                response: response.response,
            }),
        ))
    }
}
