use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::send_message::SendMessageRequest;
use crate::presentation::http::errors::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequestDto {
    pub user_id: Option<String>,
    pub current_chat: Option<String>,
    pub user_message: Option<String>,
    /// Prior user queries; absent means a fresh conversation.
    #[serde(default)]
    pub context: Vec<String>,
    pub model_id: Option<Uuid>,
}

impl SendMessageRequestDto {
    pub fn validate(self) -> Result<SendMessageRequest, ApiError> {
        let (Some(user_id), Some(current_chat), Some(user_message), Some(model_id)) = (
            self.user_id,
            self.current_chat,
            self.user_message,
            self.model_id,
        ) else {
            return Err(ApiError::MissingFields);
        };

        Ok(SendMessageRequest {
            user_id,
            current_chat,
            user_message,
            context: self.context,
            model_id,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponseDto {
    pub response: String,
}
