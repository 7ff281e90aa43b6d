pub mod chat_model;
pub mod message;

pub use chat_model::ChatModel;
pub use message::{Message, UserTranscripts};
