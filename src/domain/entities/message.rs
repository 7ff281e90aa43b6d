use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of a chat transcript. `is_response` distinguishes generated
/// answers from what the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_response: bool,
}

impl Message {
    pub fn from_user(text: String) -> Self {
        Self {
            text,
            timestamp: Utc::now(),
            is_response: false,
        }
    }

    pub fn from_response(text: String) -> Self {
        Self {
            text,
            timestamp: Utc::now(),
            is_response: true,
        }
    }

    /// Builds the retrieval query sent to the RAG service: the prior user
    /// queries followed by the new message, space-separated.
    pub fn combined_query(context: &[String], user_message: &str) -> String {
        if context.is_empty() {
            user_message.to_string()
        } else {
            format!("{} {}", context.join(" "), user_message)
        }
    }
}

/// All of a user's transcripts plus their current chat selection, keyed by
/// model id. One document per user in the transcript store; last write wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserTranscripts {
    #[serde(default)]
    pub messages: HashMap<String, Vec<Message>>,
    #[serde(default)]
    pub current_chat: Option<String>,
}

impl UserTranscripts {
    pub fn append(&mut self, chat_key: &str, message: Message) {
        self.messages
            .entry(chat_key.to_string())
            .or_default()
            .push(message);
    }

    /// Removes a chat's transcript, dropping the selection if it pointed at
    /// the removed chat.
    pub fn remove_chat(&mut self, chat_key: &str) -> bool {
        let removed = self.messages.remove(chat_key).is_some();
        if self.current_chat.as_deref() == Some(chat_key) {
            self.current_chat = None;
        }
        removed
    }

    /// The last `n` things the user typed in a chat, oldest first. This is
    /// the conversational context attached to each new query.
    pub fn context_window(&self, chat_key: &str, n: usize) -> Vec<String> {
        let Some(messages) = self.messages.get(chat_key) else {
            return Vec::new();
        };

        let user_texts: Vec<&Message> = messages.iter().filter(|m| !m.is_response).collect();
        let skip = user_texts.len().saturating_sub(n);

        user_texts[skip..].iter().map(|m| m.text.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.current_chat.is_none()
    }
}
