use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::use_cases::{
    configure_chat::ConfigureChatError, delete_chat::DeleteChatError,
    get_chat_data::GetChatDataError, list_chats::ListChatsError, send_message::SendMessageError,
};

/// Request-handler failure, rendered as status + short plain-text body.
/// Clients key off the status; the text is for display.
#[derive(Debug)]
pub enum ApiError {
    MissingFields,
    InvalidUrl,
    Duplicate,
    RateLimited,
    /// The scrape endpoint itself is gone.
    UpstreamDown(String),
    /// Upstream failure with the best available detail message.
    Upstream(String),
    Database(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                "Missing required fields".to_string(),
            ),
            ApiError::InvalidUrl => (StatusCode::BAD_REQUEST, "Invalid URL".to_string()),
            ApiError::Duplicate => (StatusCode::BAD_REQUEST, "Duplicate".to_string()),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit reached".to_string(),
            ),
            ApiError::UpstreamDown(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, message).into_response()
    }
}

impl From<ConfigureChatError> for ApiError {
    fn from(error: ConfigureChatError) -> Self {
        match error {
            ConfigureChatError::RateLimited => ApiError::RateLimited,
            ConfigureChatError::InvalidUrl(_) => ApiError::InvalidUrl,
            ConfigureChatError::Duplicate => ApiError::Duplicate,
            ConfigureChatError::DatabaseError(_) => {
                ApiError::Database("Error inserting model".to_string())
            }
            ConfigureChatError::ScrapeServiceDown => {
                ApiError::UpstreamDown("Server down".to_string())
            }
            ConfigureChatError::ScrapeFailed(_) => ApiError::Upstream(
                "Error in scraping (potential timeout, decrease depth)".to_string(),
            ),
            ConfigureChatError::InitializationFailed(message) => ApiError::Upstream(message),
        }
    }
}

impl From<SendMessageError> for ApiError {
    fn from(error: SendMessageError) -> Self {
        match error {
            SendMessageError::RateLimited => ApiError::RateLimited,
            SendMessageError::CompletionRateLimited => ApiError::RateLimited,
            SendMessageError::DatabaseError(_) => {
                ApiError::Database("Internal Server Error".to_string())
            }
            SendMessageError::RetrievalFailed(_) | SendMessageError::CompletionFailed(_) => {
                ApiError::Internal("Internal Server Error".to_string())
            }
        }
    }
}

impl From<ListChatsError> for ApiError {
    fn from(error: ListChatsError) -> Self {
        match error {
            ListChatsError::DatabaseError(msg) => ApiError::Database(msg),
        }
    }
}

impl From<DeleteChatError> for ApiError {
    fn from(error: DeleteChatError) -> Self {
        match error {
            DeleteChatError::DatabaseError(msg) => ApiError::Database(msg),
        }
    }
}

impl From<GetChatDataError> for ApiError {
    fn from(error: GetChatDataError) -> Self {
        match error {
            GetChatDataError::UpstreamError(_) => {
                ApiError::Upstream("Error in getting data".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_error_mapping() {
        assert!(matches!(
            ApiError::from(ConfigureChatError::Duplicate),
            ApiError::Duplicate
        ));
        assert!(matches!(
            ApiError::from(ConfigureChatError::ScrapeServiceDown),
            ApiError::UpstreamDown(_)
        ));

        let initialization =
            ApiError::from(ConfigureChatError::InitializationFailed("detail".to_string()));
        match initialization {
            ApiError::Upstream(message) => assert_eq!(message, "detail"),
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_completion_rate_limit_maps_to_429() {
        assert!(matches!(
            ApiError::from(SendMessageError::CompletionRateLimited),
            ApiError::RateLimited
        ));
    }
}
