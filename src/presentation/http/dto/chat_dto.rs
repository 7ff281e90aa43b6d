use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::configure_chat::ConfigureChatRequest;
use crate::application::use_cases::list_chats::ChatSummary;
use crate::presentation::http::errors::ApiError;

#[derive(Debug, Serialize)]
pub struct ChatSummaryDto {
    pub model_id: Uuid,
    pub model_name: String,
}

impl From<ChatSummary> for ChatSummaryDto {
    fn from(summary: ChatSummary) -> Self {
        Self {
            model_id: summary.model_id,
            model_name: summary.model_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatsQueryDto {
    pub user_id: Option<String>,
}

/// `?userId=&modelId=` pair used by both deletion and data inspection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelQueryDto {
    pub user_id: Option<String>,
    pub model_id: Option<Uuid>,
}

/// Fields arrive camelCase and individually optional; presence of the
/// required ones is checked here so a partial body reads as a 400, not a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureChatRequestDto {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub depth: Option<i32>,
    pub selected_tags: Option<Vec<String>>,
    pub base_url: Option<String>,
    #[serde(default)]
    pub ignore_fragments: bool,
    #[serde(default)]
    pub chunk_pages: bool,
}

impl ConfigureChatRequestDto {
    pub fn validate(self) -> Result<ConfigureChatRequest, ApiError> {
        let (Some(user_id), Some(name), Some(url), Some(depth), Some(selected_tags)) = (
            self.user_id,
            self.name,
            self.url,
            self.depth,
            self.selected_tags,
        ) else {
            return Err(ApiError::MissingFields);
        };

        Ok(ConfigureChatRequest {
            user_id,
            name,
            url,
            depth,
            selected_tags,
            base_url: self.base_url,
            ignore_fragments: self.ignore_fragments,
            chunk_pages: self.chunk_pages,
        })
    }
}
