use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::completion_service::{CompletionService, CompletionServiceError};

#[derive(Debug, Clone)]
pub struct CompletionClientConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for CompletionClientConfig {
    fn default() -> Self {
        let api_base =
            env::var("OPENAI_API_BASE").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let model =
            env::var("COMPLETION_MODEL").unwrap_or_else(|_| "gpt-4-turbo-preview".to_string());

        Self {
            api_base,
            api_key,
            model,
            timeout_secs: 60,
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionChoiceMessage,
}

#[derive(Deserialize)]
struct ChatCompletionChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    config: CompletionClientConfig,
}

impl CompletionClient {
    pub fn new(config: CompletionClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(CompletionClientConfig::default())
    }
}

#[async_trait]
impl CompletionService for CompletionClient {
    async fn complete(&self, system_prompt: &str) -> Result<String, CompletionServiceError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatCompletionMessage {
                role: "system",
                content: system_prompt,
            }],
        };

        let url = format!("{}/chat/completions", self.config.api_base);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionServiceError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionServiceError::RateLimited);
        }

        if !status.is_success() {
            return Err(CompletionServiceError::ApiError(format!(
                "completion API returned {}",
                status
            )));
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| CompletionServiceError::ApiError(e.without_url().to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionServiceError::ApiError("no choices returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_single_system_message() {
        let body = ChatCompletionRequest {
            model: "gpt-4-turbo-preview",
            messages: vec![ChatCompletionMessage {
                role: "system",
                content: "Given the following results ...",
            }],
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4-turbo-preview");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn test_response_parsing() {
        let raw = serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "an answer"}}
            ]
        });

        let parsed: ChatCompletionResponse = serde_json::from_value(raw).unwrap();

        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("an answer")
        );
    }
}
