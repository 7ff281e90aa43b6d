use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::application::ports::transcript_store::{TranscriptStore, TranscriptStoreError};
use crate::domain::entities::UserTranscripts;

/// One JSON document per user under `base_path`. Writes replace the whole
/// document (last write wins); a missing or unreadable document loads as an
/// empty transcript so session state can never block a request.
pub struct JsonTranscriptStore {
    base_path: PathBuf,
}

impl JsonTranscriptStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), TranscriptStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| TranscriptStoreError::IoError(e.to_string()))
    }

    fn user_path(&self, user_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", user_id))
    }
}

#[async_trait]
impl TranscriptStore for JsonTranscriptStore {
    async fn load(&self, user_id: &str) -> Result<UserTranscripts, TranscriptStoreError> {
        let path = self.user_path(user_id);

        if !path.exists() {
            return Ok(UserTranscripts::default());
        }

        let bytes = fs::read(&path)
            .await
            .map_err(|e| TranscriptStoreError::IoError(e.to_string()))?;

        match serde_json::from_slice(&bytes) {
            Ok(transcripts) => Ok(transcripts),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "corrupt transcript document, starting empty");
                Ok(UserTranscripts::default())
            }
        }
    }

    async fn save(
        &self,
        user_id: &str,
        transcripts: &UserTranscripts,
    ) -> Result<(), TranscriptStoreError> {
        self.ensure_directory_exists().await?;

        let bytes = serde_json::to_vec(transcripts)
            .map_err(|e| TranscriptStoreError::SerializationError(e.to_string()))?;

        fs::write(self.user_path(user_id), bytes)
            .await
            .map_err(|e| TranscriptStoreError::IoError(e.to_string()))
    }

    async fn clear(&self, user_id: &str) -> Result<(), TranscriptStoreError> {
        let path = self.user_path(user_id);

        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path)
            .await
            .map_err(|e| TranscriptStoreError::IoError(e.to_string()))
    }
}
