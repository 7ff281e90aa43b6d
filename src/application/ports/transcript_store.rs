use async_trait::async_trait;

use crate::domain::entities::UserTranscripts;

#[derive(Debug)]
pub enum TranscriptStoreError {
    IoError(String),
    SerializationError(String),
}

impl std::fmt::Display for TranscriptStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptStoreError::IoError(msg) => write!(f, "IO error: {}", msg),
            TranscriptStoreError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TranscriptStoreError {}

/// Per-user session state: chat transcripts and the current chat selection.
/// Whole-document read/write/clear, scoped by user id. Writes are
/// last-write-wins; a missing document reads as empty.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<UserTranscripts, TranscriptStoreError>;

    async fn save(
        &self,
        user_id: &str,
        transcripts: &UserTranscripts,
    ) -> Result<(), TranscriptStoreError>;

    async fn clear(&self, user_id: &str) -> Result<(), TranscriptStoreError>;
}
