use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A configured chat: a user-owned, independently indexed content source.
/// The row in `models` is the source of truth for the chat's identity; the
/// scraped content itself lives in the external retrieval service, keyed by
/// `(user_id, model_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatModel {
    model_id: Uuid,
    user_id: String,
    model_name: String,
    created_at: DateTime<Utc>,
}

impl ChatModel {
    pub fn new(user_id: String, model_name: String) -> Self {
        Self {
            model_id: Uuid::new_v4(),
            user_id,
            model_name,
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        model_id: Uuid,
        user_id: String,
        model_name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            model_id,
            user_id,
            model_name,
            created_at,
        }
    }

    pub fn model_id(&self) -> Uuid {
        self.model_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_identity() {
        let a = ChatModel::new("u1".to_string(), "docs".to_string());
        let b = ChatModel::new("u1".to_string(), "docs".to_string());

        assert_ne!(a.model_id(), b.model_id());
        assert_eq!(a.user_id(), "u1");
        assert_eq!(a.model_name(), "docs");
    }

    #[test]
    fn test_ownership() {
        let chat = ChatModel::new("u1".to_string(), "docs".to_string());

        assert!(chat.is_owned_by("u1"));
        assert!(!chat.is_owned_by("u2"));
    }
}
