use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, Response};
use serde::Serialize;
use std::env;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::rag_service::{
    IngestRequest, RagService, RagServiceError, RetrievalRequest,
};

#[derive(Debug, Clone)]
pub struct RagClientConfig {
    pub rag_endpoint: String,
    pub data_endpoint: String,
    pub auth_token: String,
    pub timeout_secs: u64,
}

impl Default for RagClientConfig {
    fn default() -> Self {
        let rag_endpoint =
            env::var("RAG_ENDPOINT").unwrap_or_else(|_| "http://localhost:8002/rag".to_string());
        let data_endpoint = env::var("GET_DATA_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:8002/get_data".to_string());
        let auth_token = env::var("MIRAGE_AUTH_TOKEN_MODAL").unwrap_or_default();

        Self {
            rag_endpoint,
            data_endpoint,
            auth_token,
            timeout_secs: 60,
        }
    }
}

/// Both ingestion and retrieval go to the same endpoint; the `inference`
/// flag selects the mode, matching the service's wire contract.
#[derive(Serialize)]
struct RagRequestBody {
    query: String,
    data: serde_json::Value,
    chunk_pages: bool,
    user_id: String,
    model_id: String,
    inference: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    k: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct RagClient {
    client: Client,
    config: RagClientConfig,
}

impl RagClient {
    pub fn new(config: RagClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(RagClientConfig::default())
    }

    /// Turns a non-success response into an error carrying the upstream
    /// body's `detail` field when the service provided one.
    async fn upstream_error(response: Response) -> RagServiceError {
        let status = response.status().as_u16();
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("detail")
                    .and_then(|d| d.as_str())
                    .map(|d| d.to_string())
            });

        RagServiceError::Upstream { status, detail }
    }

    async fn post_rag(&self, body: &RagRequestBody) -> Result<Response, RagServiceError> {
        let response = self
            .client
            .post(&self.config.rag_endpoint)
            .bearer_auth(&self.config.auth_token)
            .json(body)
            .send()
            .await
            .map_err(|e| RagServiceError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        Ok(response)
    }
}

#[async_trait]
impl RagService for RagClient {
    async fn ingest(&self, request: IngestRequest) -> Result<(), RagServiceError> {
        let body = RagRequestBody {
            query: String::new(),
            data: request.data,
            chunk_pages: request.chunk_pages,
            user_id: request.user_id,
            model_id: request.model_id.to_string(),
            inference: false,
            k: None,
        };

        self.post_rag(&body).await?;

        Ok(())
    }

    async fn retrieve(
        &self,
        request: RetrievalRequest,
    ) -> Result<serde_json::Value, RagServiceError> {
        let body = RagRequestBody {
            query: request.query,
            data: serde_json::Value::String(String::new()),
            chunk_pages: false,
            user_id: request.user_id,
            model_id: request.model_id.to_string(),
            inference: true,
            k: Some(request.k),
        };

        let response = self.post_rag(&body).await?;

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| RagServiceError::NetworkError(e.without_url().to_string()))
    }

    async fn fetch_data(
        &self,
        user_id: &str,
        model_id: Uuid,
    ) -> Result<serde_json::Value, RagServiceError> {
        let response = self
            .client
            .get(&self.config.data_endpoint)
            .bearer_auth(&self.config.auth_token)
            .query(&[("user_id", user_id), ("model_id", &model_id.to_string())])
            .send()
            .await
            .map_err(|e| RagServiceError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| RagServiceError::NetworkError(e.without_url().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_body_omits_k() {
        let body = RagRequestBody {
            query: String::new(),
            data: serde_json::json!(["page text"]),
            chunk_pages: true,
            user_id: "u1".to_string(),
            model_id: Uuid::new_v4().to_string(),
            inference: false,
            k: None,
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["inference"], false);
        assert_eq!(json["chunk_pages"], true);
        assert!(json.get("k").is_none());
    }

    #[test]
    fn test_retrieval_body_carries_k() {
        let body = RagRequestBody {
            query: "What is X?".to_string(),
            data: serde_json::Value::String(String::new()),
            chunk_pages: false,
            user_id: "u1".to_string(),
            model_id: Uuid::new_v4().to_string(),
            inference: true,
            k: Some(3),
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["inference"], true);
        assert_eq!(json["k"], 3);
        assert_eq!(json["query"], "What is X?");
    }
}
